//! Needs configuration loader.

use std::path::Path;

use companion_core::NeedsConfig;

use crate::loaders::{LoadResult, ensure_non_negative, ensure_positive, read_file};

const EMBEDDED: &str = include_str!("../../data/config.toml");

/// Loader for [`NeedsConfig`] from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing NeedsConfig
    pub fn load(path: &Path) -> LoadResult<NeedsConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// The configuration shipped with the crate.
    pub fn embedded() -> LoadResult<NeedsConfig> {
        Self::parse(EMBEDDED)
    }

    /// Parses and validates TOML text. Missing sections keep their defaults.
    pub fn parse(content: &str) -> LoadResult<NeedsConfig> {
        let config: NeedsConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        validate(&config)?;
        Ok(config)
    }
}

fn validate(config: &NeedsConfig) -> LoadResult<()> {
    ensure_positive("vitals.base_health", config.vitals.base_health)?;

    let food = &config.food;
    ensure_positive("food.auto_consume_interval", food.auto_consume_interval)?;
    ensure_positive("food.regen_interval", food.regen_interval)?;
    if !(0.0..=1.0).contains(&food.refresh_threshold) {
        anyhow::bail!(
            "food.refresh_threshold must lie in [0, 1] (got {})",
            food.refresh_threshold
        );
    }

    let stamina = &config.stamina;
    ensure_non_negative("stamina.base_stamina", stamina.base_stamina)?;
    ensure_non_negative("stamina.run_drain", stamina.run_drain)?;
    ensure_non_negative("stamina.swim_drain", stamina.swim_drain)?;
    ensure_non_negative("stamina.regen_rate", stamina.regen_rate)?;
    ensure_non_negative("stamina.regen_delay", stamina.regen_delay)?;

    let rest = &config.rest;
    ensure_positive("rest.organic_check_interval", rest.organic_check_interval)?;
    ensure_positive("rest.heal_interval", rest.heal_interval)?;
    ensure_positive("rest.nav_timeout", rest.nav_timeout)?;
    ensure_non_negative("rest.commit_distance", rest.commit_distance)?;

    ensure_non_negative("rested.warmup", config.rested.warmup)?;

    let sync = &config.sync;
    ensure_positive("sync.food_flush_interval", sync.food_flush_interval)?;
    ensure_positive("sync.skills_flush_interval", sync.skills_flush_interval)?;
    ensure_positive("sync.stamina_flush_interval", sync.stamina_flush_interval)?;
    ensure_positive("sync.poll_interval", sync.poll_interval)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use companion_core::FoodScanPolicy;
    use std::io::Write;

    #[test]
    fn embedded_config_matches_defaults_except_scan_policy() {
        let config = ConfigLoader::embedded().unwrap();
        assert_eq!(
            config.food.scan_policy,
            FoodScanPolicy::DedicatedRowFirst { row: 0 }
        );
        assert_eq!(config.stamina, NeedsConfig::default().stamina);
        assert_eq!(config.sync, NeedsConfig::default().sync);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[rested]\nwarmup = 5.0").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.rested.warmup, 5.0);
        assert_eq!(config.food, NeedsConfig::default().food);
    }

    #[test]
    fn rejects_zero_intervals() {
        let err = ConfigLoader::parse("[sync]\npoll_interval = 0.0").unwrap_err();
        assert!(err.to_string().contains("sync.poll_interval"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        let err = ConfigLoader::load(&path).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }
}
