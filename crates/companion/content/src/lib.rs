//! Data-driven tuning for the companion needs engine.
//!
//! Loaders read RON/TOML data files into core types:
//! - Needs configuration (TOML)
//! - Balance table (TOML)
//! - Skill tuning table (RON)
//! - Food catalog (RON)
//!
//! Every file has an embedded default under `data/`, so hosts without a data
//! directory still get the shipped tuning.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    BalanceLoader, ConfigLoader, ContentFactory, ItemCatalog, ItemLoader, LoadResult,
    SkillTableLoader,
};
