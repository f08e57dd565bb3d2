//! Content factory for building tuning from a data directory.

use std::path::{Path, PathBuf};

use companion_core::{BalanceTable, NeedsConfig, SkillTable, Tables};

use crate::loaders::{
    BalanceLoader, ConfigLoader, ItemCatalog, ItemLoader, LoadResult, SkillTableLoader,
};

/// Loads companion content from a data directory, falling back to the
/// embedded copy for any file the directory does not provide.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── balance.toml
/// ├── skills.ron
/// └── items.ron
/// ```
pub struct ContentFactory {
    data_dir: Option<PathBuf>,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(data_dir.into()),
        }
    }

    /// Factory that only serves the embedded data.
    pub fn embedded() -> Self {
        Self { data_dir: None }
    }

    /// Load needs configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<NeedsConfig> {
        match self.existing("config.toml") {
            Some(path) => ConfigLoader::load(&path),
            None => ConfigLoader::embedded(),
        }
    }

    /// Load the balance table from `balance.toml`.
    pub fn load_balance(&self) -> LoadResult<BalanceTable> {
        match self.existing("balance.toml") {
            Some(path) => BalanceLoader::load(&path),
            None => BalanceLoader::embedded(),
        }
    }

    /// Load the skill tuning table from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<SkillTable> {
        match self.existing("skills.ron") {
            Some(path) => SkillTableLoader::load(&path),
            None => SkillTableLoader::embedded(),
        }
    }

    /// Load the item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<ItemCatalog> {
        match self.existing("items.ron") {
            Some(path) => ItemLoader::load(&path),
            None => ItemLoader::embedded(),
        }
    }

    /// Balance and skill tables bundled for the core. Call again on world
    /// reload and hand the result to `CompanionNeeds::on_world_reload`.
    pub fn load_tables(&self) -> LoadResult<Tables> {
        Ok(Tables::new(self.load_balance()?, self.load_skills()?))
    }

    fn existing(&self, file: &str) -> Option<PathBuf> {
        let path = self.data_dir.as_deref().map(|dir| dir.join(file))?;
        path.is_file().then_some(path)
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use companion_core::SkillId;

    #[test]
    fn directory_files_override_embedded_ones() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("skills.ron"),
            "(skills: [(skill: Run, increase_step: 2.0)])",
        )
        .unwrap();

        let factory = ContentFactory::new(dir.path());
        let tables = factory.load_tables().unwrap();
        assert_eq!(tables.skills.increase_step(SkillId::Run), Some(2.0));
        assert_eq!(tables.skills.increase_step(SkillId::Swim), None);
        assert_eq!(*tables.balance, BalanceTable::default());
        assert_eq!(factory.load_items().unwrap().items.len(), 5);
    }

    #[test]
    fn malformed_file_is_an_error_not_a_fallback() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.toml"), "[food\n").unwrap();
        assert!(ContentFactory::new(dir.path()).load_config().is_err());
    }

    #[test]
    fn embedded_factory_loads_everything() {
        let factory = ContentFactory::embedded();
        assert!(factory.data_dir().is_none());
        assert!(factory.load_config().is_ok());
        assert_eq!(factory.load_tables().unwrap().skills.len(), 23);
    }
}
