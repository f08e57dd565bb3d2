//! Per-agent state owned by the companion's simulation instance.
//!
//! The persisted record is only a mirror of these types; see [`crate::codec`].
mod common;
mod food;
mod rest;
mod rested;
mod skills;
mod stamina;
mod status;
mod vitals;

pub use common::{AttachPoint, EntityHandle, IntervalTimer, Position, sanitize};
pub use food::{FOOD_DECAY_EXPONENT, FOOD_SLOT_COUNT, FoodSlot, FoodSlots};
pub use rest::{RestMode, RestRecord, RestTarget, RestTargetKind};
pub use rested::RestedBuffState;
pub use skills::{MAX_SKILL_LEVEL, SkillId, SkillRecord};
pub use stamina::StaminaState;
pub use status::{StatusEffect, StatusEffects};
pub use vitals::Vitals;
