//! Outbound notifications.
//!
//! Subsystems push events while ticking; the host drains them after each tick
//! to play sounds and animations, show level-up messages and update the HUD.

use crate::rest::RestStopReason;
use crate::state::{RestTargetKind, SkillId};

#[derive(Debug, Clone, PartialEq)]
pub enum NeedsEvent {
    /// Food was eaten into a slot. Triggers the consumption sound/animation.
    FoodConsumed {
        slot: usize,
        item: String,
        refreshed: bool,
    },

    /// A food slot ran out and was cleared.
    FoodExpired { slot: usize, item: String },

    /// A skill gained a level.
    SkillLevelUp { skill: SkillId, level: u32 },

    /// Companion started navigating toward a rest target.
    RestApproach { kind: RestTargetKind },

    /// Companion committed to sitting or sleeping.
    RestStarted {
        kind: RestTargetKind,
        directed: bool,
    },

    /// Companion left any resting or navigating state.
    RestStopped { reason: RestStopReason },

    /// Rested buff granted or extended. Drives the HUD display.
    RestedApplied { comfort_level: i32, duration: f32 },

    /// Rested buff ran out.
    RestedExpired,
}

/// Buffer of events produced since the last drain.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<NeedsEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: NeedsEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> Vec<NeedsEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NeedsEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
