//! Collaborator doubles shared by the scenario tests.
#![allow(dead_code)]

use std::collections::HashMap;

use companion_core::{
    AttachPoint, Behavior, ComfortReading, CompanionNeeds, ControllerView, EntityHandle, Env,
    Inventory, InventoryEntry, ItemDescriptor, Locomotion, PcgRng, Position, Record,
    RestTargetView, Surroundings, WorldOracle,
};

pub const PLAYER: EntityHandle = EntityHandle(1);
pub const FIRE: EntityHandle = EntityHandle(100);
pub const BED: EntityHandle = EntityHandle(200);

pub const FIRE_AT: Position = Position::new(1.5, 0.0, 0.0);
pub const BED_AT: Position = Position::new(40.0, 0.0, 0.0);

#[derive(Default)]
pub struct TestWorld {
    pub hostile: bool,
    pub targets: HashMap<EntityHandle, RestTargetView>,
    pub comfort: ComfortReading,
    pub banned: Vec<String>,
}

impl TestWorld {
    /// A burning fire next to the origin and a bed further away.
    pub fn camp() -> Self {
        let mut world = Self::default();
        world.targets.insert(FIRE, RestTargetView::fire(FIRE_AT, true));
        world.targets.insert(
            BED,
            RestTargetView::bed(
                BED_AT,
                AttachPoint {
                    position: Position::new(40.0, 0.6, 0.0),
                    yaw: 3.1,
                },
            ),
        );
        world
    }
}

impl WorldOracle for TestWorld {
    fn hostile_within(&self, _position: Position, _radius: f32) -> bool {
        self.hostile
    }

    fn nearest_burning_fire(&self, position: Position, radius: f32) -> Option<EntityHandle> {
        self.targets
            .iter()
            .filter(|(_, view)| view.burning && view.attach.is_none())
            .find(|(_, view)| view.position.within(&position, radius))
            .map(|(handle, _)| *handle)
    }

    fn rest_target(&self, handle: EntityHandle) -> Option<RestTargetView> {
        self.targets.get(&handle).copied()
    }

    fn comfort_at(&self, _position: Position) -> ComfortReading {
        self.comfort
    }

    fn consumption_allowed(&self, item: &ItemDescriptor) -> bool {
        !self.banned.contains(&item.name)
    }
}

#[derive(Default)]
pub struct TestInventory {
    stacks: Vec<(InventoryEntry, u32)>,
}

impl TestInventory {
    pub fn with(mut self, item: ItemDescriptor, count: u32) -> Self {
        let column = self.stacks.len() as u8;
        self.stacks.push((InventoryEntry::new(item, 0, column), count));
        self
    }

    pub fn count(&self, name: &str) -> u32 {
        self.stacks
            .iter()
            .filter(|(entry, _)| entry.item.name == name)
            .map(|(_, count)| *count)
            .sum()
    }
}

impl Inventory for TestInventory {
    fn find_all_items(&self) -> Vec<InventoryEntry> {
        self.stacks
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(entry, _)| entry.clone())
            .collect()
    }

    fn contains(&self, item_name: &str) -> bool {
        self.count(item_name) > 0
    }

    fn remove_one(&mut self, item_name: &str) -> bool {
        let stack = self
            .stacks
            .iter_mut()
            .find(|(entry, count)| entry.item.name == item_name && *count > 0);
        match stack {
            Some((_, count)) => {
                *count -= 1;
                true
            }
            None => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Order {
    Follow(EntityHandle),
    Hold(Position),
    MoveTo(Position),
    Stop,
    Face(Position),
    Pin(Position, f32),
}

#[derive(Default)]
pub struct TestLocomotion {
    pub orders: Vec<Order>,
}

impl TestLocomotion {
    pub fn last(&self) -> Option<&Order> {
        self.orders.last()
    }
}

impl Locomotion for TestLocomotion {
    fn follow(&mut self, target: EntityHandle) {
        self.orders.push(Order::Follow(target));
    }

    fn hold(&mut self, position: Position) {
        self.orders.push(Order::Hold(position));
    }

    fn move_to(&mut self, position: Position) {
        self.orders.push(Order::MoveTo(position));
    }

    fn stop(&mut self) {
        self.orders.push(Order::Stop);
    }

    fn face(&mut self, position: Position) {
        self.orders.push(Order::Face(position));
    }

    fn pin(&mut self, position: Position, yaw: f32) {
        self.orders.push(Order::Pin(position, yaw));
    }
}

/// Everything one host supplies to its agent.
pub struct Host {
    pub world: TestWorld,
    pub rng: PcgRng,
    pub inventory: TestInventory,
    pub locomotion: TestLocomotion,
    pub surroundings: Surroundings,
}

impl Host {
    pub fn new(world: TestWorld, inventory: TestInventory) -> Self {
        Self {
            world,
            rng: PcgRng,
            inventory,
            locomotion: TestLocomotion::default(),
            surroundings: Surroundings::at(Position::ORIGIN, Behavior::Follow(PLAYER)),
        }
    }

    pub fn env(&mut self) -> Env<'_> {
        Env::new(
            &self.world,
            &self.rng,
            &mut self.inventory,
            &mut self.locomotion,
        )
    }

    pub fn player_sitting(&mut self, for_seconds: f32) {
        self.surroundings.controller = Some(ControllerView {
            handle: PLAYER,
            position: Position::new(0.5, 0.0, 0.0),
            sitting_for: Some(for_seconds),
        });
    }
}

/// Ticks one agent on one host.
pub fn tick(agent: &mut CompanionNeeds, host: &mut Host, record: &mut dyn Record, dt: f32) {
    let surroundings = host.surroundings;
    let mut env = host.env();
    agent.tick(dt, &mut env, &surroundings, record);
}

/// Ticks `count` frames of `dt`.
pub fn run(agent: &mut CompanionNeeds, host: &mut Host, record: &mut dyn Record, count: usize, dt: f32) {
    for _ in 0..count {
        tick(agent, host, record, dt);
    }
}
