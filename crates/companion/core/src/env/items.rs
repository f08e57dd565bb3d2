/// Inventory collaborator.
///
/// Storage itself lives outside the core; the needs engine only queries it and
/// removes single units of consumed food.
pub trait Inventory {
    /// Every stack currently held, in inventory order (row-major).
    fn find_all_items(&self) -> Vec<InventoryEntry>;

    fn contains(&self, item_name: &str) -> bool;

    /// Removes one unit of the named item. Returns false if none was held.
    fn remove_one(&mut self, item_name: &str) -> bool;
}

/// A stack of items at a grid position.
#[derive(Clone, Debug, PartialEq)]
pub struct InventoryEntry {
    pub item: ItemDescriptor,
    pub row: u8,
    pub column: u8,
}

impl InventoryEntry {
    pub fn new(item: ItemDescriptor, row: u8, column: u8) -> Self {
        Self { item, row, column }
    }
}

/// Broad item category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemCategory {
    Consumable,
    Material,
    Weapon,
    Armor,
    Tool,
    Misc,
}

/// Status effect attached to an item and applied once on consumption.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffectRef {
    pub name: String,
    pub duration: f32,
}

/// Read-only description of an item as the host game defines it.
///
/// # Food
///
/// An item counts as food when it is consumable and has a positive food,
/// stamina or eitr value. Its `burn_time_seconds` becomes the slot duration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDescriptor {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub prefab: String,
    pub category: ItemCategory,
    #[cfg_attr(feature = "serde", serde(default))]
    pub food_value: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stamina_value: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub eitr_value: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub regen_value: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub burn_time_seconds: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attached_status_effect: Option<StatusEffectRef>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub uses_durability: bool,
    #[cfg_attr(feature = "serde", serde(default = "full_durability"))]
    pub durability_fraction: f32,
}

#[cfg(feature = "serde")]
fn full_durability() -> f32 {
    1.0
}

impl ItemDescriptor {
    /// Creates a food item with no attached effect.
    pub fn food(name: &str, food: f32, stamina: f32, eitr: f32, burn_time: f32) -> Self {
        Self {
            name: name.to_owned(),
            prefab: String::new(),
            category: ItemCategory::Consumable,
            food_value: food,
            stamina_value: stamina,
            eitr_value: eitr,
            regen_value: 0.0,
            burn_time_seconds: burn_time,
            attached_status_effect: None,
            uses_durability: false,
            durability_fraction: 1.0,
        }
    }

    pub fn with_prefab(mut self, prefab: &str) -> Self {
        self.prefab = prefab.to_owned();
        self
    }

    pub fn with_regen(mut self, regen: f32) -> Self {
        self.regen_value = regen;
        self
    }

    pub fn with_status_effect(mut self, name: &str, duration: f32) -> Self {
        self.attached_status_effect = Some(StatusEffectRef {
            name: name.to_owned(),
            duration,
        });
        self
    }

    pub fn is_consumable(&self) -> bool {
        self.category == ItemCategory::Consumable
    }

    /// Consumable with a positive food, stamina or eitr value, and not spoiled.
    pub fn is_food(&self) -> bool {
        let nourishing = self.food_value > 0.0 || self.stamina_value > 0.0 || self.eitr_value > 0.0;
        let spoiled = self.uses_durability && self.durability_fraction <= 0.0;
        self.is_consumable() && nourishing && !spoiled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn food_requires_consumable_with_value() {
        assert!(ItemDescriptor::food("Bread", 10.0, 0.0, 0.0, 600.0).is_food());
        assert!(ItemDescriptor::food("Honey", 0.0, 20.0, 0.0, 600.0).is_food());
        assert!(!ItemDescriptor::food("Water", 0.0, 0.0, 0.0, 600.0).is_food());

        let mut wood = ItemDescriptor::food("Wood", 10.0, 0.0, 0.0, 0.0);
        wood.category = ItemCategory::Material;
        assert!(!wood.is_food());
    }

    #[test]
    fn spoiled_food_is_not_eligible() {
        let mut meat = ItemDescriptor::food("CookedMeat", 30.0, 10.0, 0.0, 1200.0);
        meat.uses_durability = true;
        meat.durability_fraction = 0.0;
        assert!(!meat.is_food());
        meat.durability_fraction = 0.3;
        assert!(meat.is_food());
    }
}
