use crate::state::{AttachPoint, EntityHandle, Position, RestTargetKind};

use super::items::ItemDescriptor;

/// Read-only world queries used by the rest state machine and food tracker.
///
/// Implementations answer from whatever the host considers current; every
/// answer is re-asked each tick, so a handle that went stale between ticks is
/// simply reported as gone.
pub trait WorldOracle: Send + Sync {
    /// Whether any hostile creature is within `radius` of `position`.
    fn hostile_within(&self, position: Position, radius: f32) -> bool;

    /// The closest burning fire within `radius`, if any.
    fn nearest_burning_fire(&self, position: Position, radius: f32) -> Option<EntityHandle>;

    /// Looks up a fire or bed. `None` means the entity no longer exists.
    fn rest_target(&self, handle: EntityHandle) -> Option<RestTargetView>;

    /// Shelter and raw comfort at a position.
    fn comfort_at(&self, position: Position) -> ComfortReading;

    /// Generic consumption-eligibility check applied to every food item.
    fn consumption_allowed(&self, _item: &ItemDescriptor) -> bool {
        true
    }
}

/// Snapshot of a rest target as seen this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RestTargetView {
    pub kind: RestTargetKind,
    pub position: Position,
    /// Meaningful for fires only; beds report true.
    pub burning: bool,
    /// Where a sleeper is pinned. Fires have none.
    pub attach: Option<AttachPoint>,
}

impl RestTargetView {
    pub fn fire(position: Position, burning: bool) -> Self {
        Self {
            kind: RestTargetKind::Fire,
            position,
            burning,
            attach: None,
        }
    }

    pub fn bed(position: Position, attach: AttachPoint) -> Self {
        Self {
            kind: RestTargetKind::Bed,
            position,
            burning: true,
            attach: Some(attach),
        }
    }
}

/// Environmental comfort as reported by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ComfortReading {
    pub in_shelter: bool,
    /// Raw comfort from nearby furniture and fires.
    pub comfort: i32,
}

impl ComfortReading {
    /// Comfort level that scales the rested buff: raw comfort when sheltered,
    /// never below one.
    pub fn level(&self) -> i32 {
        if self.in_shelter {
            self.comfort.max(1)
        } else {
            1
        }
    }
}
