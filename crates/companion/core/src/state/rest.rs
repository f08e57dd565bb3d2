use super::common::{EntityHandle, Position};

/// Behavioural resting mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RestMode {
    #[default]
    Idle,
    Navigating,
    Sitting,
    Sleeping,
}

impl RestMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Navigating => "navigating",
            Self::Sitting => "sitting",
            Self::Sleeping => "sleeping",
        }
    }

    pub const fn is_resting(&self) -> bool {
        matches!(self, Self::Sitting | Self::Sleeping)
    }
}

/// Kind of entity a rest can be anchored to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RestTargetKind {
    Fire,
    Bed,
}

/// Weak reference to the fire or bed being rested at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RestTarget {
    pub handle: EntityHandle,
    pub kind: RestTargetKind,
}

/// Rest state of the companion.
///
/// Invariant: `target` is `Some` only while `mode` is not `Idle`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RestRecord {
    pub mode: RestMode,
    /// Hotkey-triggered rather than organic.
    pub directed: bool,
    pub target: Option<RestTarget>,
    pub nav_target: Position,
    pub nav_timeout_remaining: f32,
}

impl RestRecord {
    pub fn target_kind(&self) -> Option<RestTargetKind> {
        self.target.map(|t| t.kind)
    }
}
