//! Balance table loader.

use std::path::Path;

use companion_core::BalanceTable;

use crate::loaders::{LoadResult, ensure_non_negative, read_file};

const EMBEDDED: &str = include_str!("../../data/balance.toml");

/// Loader for the process-wide [`BalanceTable`] from TOML files.
pub struct BalanceLoader;

impl BalanceLoader {
    pub fn load(path: &Path) -> LoadResult<BalanceTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn embedded() -> LoadResult<BalanceTable> {
        Self::parse(EMBEDDED)
    }

    pub fn parse(content: &str) -> LoadResult<BalanceTable> {
        let table: BalanceTable = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse balance TOML: {}", e))?;

        ensure_non_negative("skill_gain_rate", table.skill_gain_rate)?;
        ensure_non_negative("skill_reduction_rate", table.skill_reduction_rate)?;
        ensure_non_negative("rested_base_ttl", table.rested_base_ttl)?;
        ensure_non_negative(
            "rested_ttl_per_comfort_level",
            table.rested_ttl_per_comfort_level,
        )?;
        ensure_non_negative(
            "rested.health_regen_multiplier",
            table.rested.health_regen_multiplier,
        )?;
        ensure_non_negative(
            "rested.stamina_regen_additive_bonus",
            table.rested.stamina_regen_additive_bonus,
        )?;
        ensure_non_negative("rested.skill_xp_modifier", table.rested.skill_xp_modifier)?;
        Ok(table)
    }
}
