//! Needs and progression simulation for one companion agent.
//!
//! `companion-core` tracks food buffs, stamina, resting, the rested buff and
//! skill progression, and keeps them consistent across hosts through a
//! replicated record that only the owning host writes. Hosts drive everything
//! through [`agent::CompanionNeeds`] and supply world access via the traits in
//! [`env`].
pub mod agent;
pub mod capability;
pub mod codec;
pub mod config;
pub mod env;
pub mod error;
pub mod events;
pub mod food;
pub mod rest;
pub mod rested;
pub mod skills;
pub mod stamina;
pub mod state;
pub mod sync;

pub use agent::CompanionNeeds;
pub use capability::{
    Capabilities, SkillAccess, drain_stamina, raise_skill, restore_stamina, try_use_stamina,
};
pub use codec::{CodecError, HostId, MemoryRecord, Record, RecordValue, RecordWriter};
pub use config::{
    DuplicatePolicy, FoodConfig, FoodScanPolicy, NeedsConfig, RestConfig, RestedConfig,
    StaminaConfig, SyncConfig, VitalsConfig,
};
pub use env::{
    BalanceTable, Behavior, ComfortReading, ControllerView, Env, Inventory, InventoryEntry,
    ItemCategory, ItemDescriptor, Locomotion, Motion, MotionFlags, PcgRng, RestTargetView,
    RestedModifiers, RngOracle, SkillDefinition, SkillTable, StatusEffectRef, Surroundings, Tables,
    WorldOracle, roll_seed,
};
pub use error::{ErrorSeverity, NeedsError};
pub use events::{EventLog, NeedsEvent};
pub use food::{ConsumeContext, ConsumeError, FoodEffectTracker, scaled_bonus};
pub use rest::{RestContext, RestStateMachine, RestStopReason, RestTick, RestTransition};
pub use rested::RestedBuffAccumulator;
pub use skills::SkillProgressionTracker;
pub use stamina::StaminaController;
pub use state::{
    AttachPoint, EntityHandle, FoodSlot, FoodSlots, IntervalTimer, Position, RestMode, RestRecord,
    RestTarget, RestTargetKind, RestedBuffState, SkillId, SkillRecord, StaminaState, StatusEffect,
    StatusEffects, Vitals,
};
pub use sync::{Authority, FlushDue, Handoff, SyncSchedule};
