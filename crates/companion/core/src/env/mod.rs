//! Collaborators the needs engine talks to but does not own.
//!
//! Read-only oracles (world queries, balance and skill tables, rng) and the two
//! mutable collaborators (inventory, locomotion) are bundled per tick in
//! [`Env`], so subsystems never hold references into the host between ticks.
mod balance;
mod items;
mod locomotion;
mod rng;
mod skills;
mod surroundings;
mod world;

use std::sync::Arc;

pub use balance::{BalanceTable, RestedModifiers};
pub use items::{Inventory, InventoryEntry, ItemCategory, ItemDescriptor, StatusEffectRef};
pub use locomotion::Locomotion;
pub use rng::{PcgRng, RngOracle, roll_seed};
pub use skills::{SkillDefinition, SkillTable};
pub use surroundings::{Behavior, ControllerView, Motion, MotionFlags, Surroundings};
pub use world::{ComfortReading, RestTargetView, WorldOracle};

/// Everything a tick needs from the host.
pub struct Env<'a> {
    pub world: &'a dyn WorldOracle,
    pub rng: &'a dyn RngOracle,
    pub inventory: &'a mut dyn Inventory,
    pub locomotion: &'a mut dyn Locomotion,
}

impl<'a> Env<'a> {
    pub fn new(
        world: &'a dyn WorldOracle,
        rng: &'a dyn RngOracle,
        inventory: &'a mut dyn Inventory,
        locomotion: &'a mut dyn Locomotion,
    ) -> Self {
        Self {
            world,
            rng,
            inventory,
            locomotion,
        }
    }
}

/// Process-wide read-only tables, shared by every agent on a host.
///
/// Replaced wholesale on world reload; see `CompanionNeeds::on_world_reload`.
#[derive(Clone, Debug, Default)]
pub struct Tables {
    pub balance: Arc<BalanceTable>,
    pub skills: Arc<SkillTable>,
}

impl Tables {
    pub fn new(balance: BalanceTable, skills: SkillTable) -> Self {
        Self {
            balance: Arc::new(balance),
            skills: Arc::new(skills),
        }
    }

    /// Default balance with every skill at the default step.
    pub fn standard() -> Self {
        Self::new(BalanceTable::default(), SkillTable::standard())
    }
}
