//! A small scripted camp: one fire, one bed, a stash and a pair of legs.

use companion_core::{
    AttachPoint, ComfortReading, EntityHandle, Inventory, InventoryEntry, ItemDescriptor,
    Locomotion, Position, RestTargetView, WorldOracle,
};
use tracing::debug;

pub const PLAYER: EntityHandle = EntityHandle(1);
pub const FIRE: EntityHandle = EntityHandle(10);
pub const BED: EntityHandle = EntityHandle(11);

const FIRE_AT: Position = Position::new(2.0, 0.0, 0.0);
const BED_AT: Position = Position::new(30.0, 0.0, 4.0);

/// World state both hosts observe.
#[derive(Debug, Default)]
pub struct Camp {
    pub hostile: bool,
    pub fire_burning: bool,
}

impl Camp {
    pub fn new() -> Self {
        Self {
            hostile: false,
            fire_burning: true,
        }
    }
}

impl WorldOracle for Camp {
    fn hostile_within(&self, _position: Position, _radius: f32) -> bool {
        self.hostile
    }

    fn nearest_burning_fire(&self, position: Position, radius: f32) -> Option<EntityHandle> {
        (self.fire_burning && position.within(&FIRE_AT, radius)).then_some(FIRE)
    }

    fn rest_target(&self, handle: EntityHandle) -> Option<RestTargetView> {
        match handle {
            FIRE => Some(RestTargetView::fire(FIRE_AT, self.fire_burning)),
            BED => Some(RestTargetView::bed(
                BED_AT,
                AttachPoint {
                    position: Position::new(30.0, 0.5, 4.0),
                    yaw: std::f32::consts::PI,
                },
            )),
            _ => None,
        }
    }

    fn comfort_at(&self, position: Position) -> ComfortReading {
        // The bed sits inside a hut.
        let in_shelter = position.within(&BED_AT, 6.0);
        ComfortReading {
            in_shelter,
            comfort: if in_shelter { 3 } else { 1 },
        }
    }
}

/// Stacks of items in one inventory row.
#[derive(Debug, Default)]
pub struct Stash {
    stacks: Vec<(ItemDescriptor, u32)>,
}

impl Stash {
    pub fn add(&mut self, item: ItemDescriptor, count: u32) {
        self.stacks.push((item, count));
    }

    pub fn units(&self) -> u32 {
        self.stacks.iter().map(|(_, count)| count).sum()
    }
}

impl Inventory for Stash {
    fn find_all_items(&self) -> Vec<InventoryEntry> {
        self.stacks
            .iter()
            .enumerate()
            .filter(|(_, (_, count))| *count > 0)
            .map(|(column, (item, _))| InventoryEntry::new(item.clone(), 0, column as u8))
            .collect()
    }

    fn contains(&self, item_name: &str) -> bool {
        self.stacks
            .iter()
            .any(|(item, count)| item.name == item_name && *count > 0)
    }

    fn remove_one(&mut self, item_name: &str) -> bool {
        match self
            .stacks
            .iter_mut()
            .find(|(item, count)| item.name == item_name && *count > 0)
        {
            Some((_, count)) => {
                *count -= 1;
                true
            }
            None => false,
        }
    }
}

/// Locomotion that walks straight toward its destination.
#[derive(Debug, Default)]
pub struct Legs {
    destination: Option<Position>,
    pinned: bool,
}

impl Legs {
    pub const SPEED: f32 = 4.0;

    /// Moves `position` one frame toward the destination. Returns true on the
    /// frame the destination is reached.
    pub fn step(&mut self, position: &mut Position, dt: f32) -> bool {
        let Some(target) = self.destination else {
            return false;
        };
        let distance = position.distance(&target);
        let stride = Self::SPEED * dt;
        if distance <= stride {
            *position = target;
            self.destination = None;
            return true;
        }
        let t = stride / distance;
        position.x += (target.x - position.x) * t;
        position.y += (target.y - position.y) * t;
        position.z += (target.z - position.z) * t;
        false
    }

    pub fn is_walking(&self) -> bool {
        self.destination.is_some()
    }
}

impl Locomotion for Legs {
    fn follow(&mut self, target: EntityHandle) {
        self.destination = None;
        self.pinned = false;
        debug!(target: "sim::legs", ?target, "Following");
    }

    fn hold(&mut self, position: Position) {
        self.destination = None;
        self.pinned = false;
        debug!(target: "sim::legs", ?position, "Holding");
    }

    fn move_to(&mut self, position: Position) {
        self.destination = Some(position);
        self.pinned = false;
        debug!(target: "sim::legs", ?position, "Walking");
    }

    fn stop(&mut self) {
        self.destination = None;
    }

    fn face(&mut self, _position: Position) {}

    fn pin(&mut self, position: Position, yaw: f32) {
        if !self.pinned {
            debug!(target: "sim::legs", ?position, yaw, "Pinned to bed");
        }
        self.pinned = true;
    }
}
