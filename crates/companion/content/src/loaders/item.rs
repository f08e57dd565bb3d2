//! Item catalog loader.

use std::path::Path;

use companion_core::ItemDescriptor;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

const EMBEDDED: &str = include_str!("../../data/items.ron");

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemDescriptor>,
}

impl ItemCatalog {
    pub fn get(&self, name: &str) -> Option<&ItemDescriptor> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Items that qualify as food.
    pub fn food(&self) -> impl Iterator<Item = &ItemDescriptor> {
        self.items.iter().filter(|item| item.is_food())
    }
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing ItemCatalog
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn embedded() -> LoadResult<ItemCatalog> {
        Self::parse(EMBEDDED)
    }

    /// Item names must be unique.
    pub fn parse(content: &str) -> LoadResult<ItemCatalog> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        for (index, item) in catalog.items.iter().enumerate() {
            if item.name.is_empty() {
                anyhow::bail!("Item #{} has an empty name", index);
            }
            if catalog.items[..index].iter().any(|other| other.name == item.name) {
                anyhow::bail!("Duplicate item '{}' in catalog", item.name);
            }
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_separates_food_from_the_rest() {
        let catalog = ItemLoader::embedded().unwrap();
        let food: Vec<&str> = catalog.food().map(|item| item.name.as_str()).collect();
        assert_eq!(food, ["CookedMeat", "Raspberries", "QueensJam"]);

        let mead = catalog.get("MeadHealthMinor").unwrap();
        assert_eq!(
            mead.attached_status_effect.as_ref().map(|e| e.duration),
            Some(120.0)
        );
        assert_eq!(catalog.get("Wood").map(|w| w.durability_fraction), Some(1.0));
    }

    #[test]
    fn rejects_duplicate_names() {
        let ron = r#"(items: [
            (name: "Bread", category: Consumable, food_value: 10.0, burn_time_seconds: 600.0),
            (name: "Bread", category: Consumable, food_value: 12.0, burn_time_seconds: 600.0),
        ])"#;
        let err = ItemLoader::parse(ron).unwrap_err();
        assert!(err.to_string().contains("Duplicate item 'Bread'"));
    }
}
