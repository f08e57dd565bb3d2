//! Rest and sleep behaviour.
//!
//! ```text
//! Idle ──command──▶ Navigating ──arrived──▶ Sitting | Sleeping
//!  │                    │                        │
//!  └──organic sit──▶ Sitting                     │
//!                       └──────── stop_all ◀─────┘
//! ```
//!
//! The machine only decides; it reports every change as a [`RestTransition`]
//! and the owning aggregate applies the stamina, rested buff and `in_bed`
//! side effects.
mod machine;

pub use machine::{RestContext, RestStateMachine, RestTick};

use crate::state::{RestMode, RestTargetKind};

/// Why a rest (or the approach to one) ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RestStopReason {
    /// Same command issued again.
    Toggled,
    /// Superseded by another command or an explicit stop.
    Commanded,
    /// Navigation did not arrive in time.
    Timeout,
    /// Fire or bed no longer exists.
    TargetLost,
    FireOut,
    Hostile,
    /// Controlling player stood up or vanished (organic sits only).
    ControllerLeft,
    /// Follow mode disengaged (organic sits only).
    FollowDisengaged,
    /// Controlling player walked away (organic sits only).
    OutOfRange,
}

impl RestStopReason {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Toggled => "toggled",
            Self::Commanded => "commanded",
            Self::Timeout => "timeout",
            Self::TargetLost => "target_lost",
            Self::FireOut => "fire_out",
            Self::Hostile => "hostile",
            Self::ControllerLeft => "controller_left",
            Self::FollowDisengaged => "follow_disengaged",
            Self::OutOfRange => "out_of_range",
        }
    }
}

/// A state change reported by [`RestStateMachine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RestTransition {
    /// Entered `Navigating` toward a target.
    Approaching { kind: RestTargetKind },
    /// Committed to `Sitting` (fire) or `Sleeping` (bed).
    Started { kind: RestTargetKind, directed: bool },
    /// Returned to `Idle`.
    Stopped {
        from: RestMode,
        reason: RestStopReason,
    },
}
