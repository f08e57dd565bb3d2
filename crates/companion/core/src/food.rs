//! Food effect tracking.
//!
//! Up to three foods are active at once. Each slot decays in real seconds and
//! contributes health, stamina and eitr bonuses along the front-loaded vanilla
//! curve (see [`FoodSlot::scaled`]). The tracker also owns auto-consumption:
//! filling empty slots from the inventory and refreshing the most depleted
//! slot once it passes the refresh threshold.

use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::config::{DuplicatePolicy, FoodConfig, FoodScanPolicy};
use crate::env::{Inventory, ItemDescriptor, WorldOracle};
use crate::error::{ErrorSeverity, NeedsError};
use crate::events::{EventLog, NeedsEvent};
use crate::state::{
    FOOD_SLOT_COUNT, FoodSlot, FoodSlots, IntervalTimer, StatusEffects, Vitals, sanitize,
};

/// Why a consumption attempt did not happen.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConsumeError {
    #[error("'{0}' is not a food item")]
    NotFood(String),

    #[error("'{0}' was rejected by the consumption eligibility check")]
    NotAllowed(String),

    #[error("status effect '{effect}' of '{item}' is already active")]
    EffectActive { item: String, effect: String },

    #[error("'{0}' is not in the inventory")]
    NotInInventory(String),

    #[error("'{item}' is already active in slot {slot}")]
    Duplicate { item: String, slot: usize },

    #[error("no free food slot")]
    NoFreeSlot,

    #[error("slot {0} is not refreshable")]
    NotRefreshable(usize),

    #[error("slot index {0} is out of range")]
    InvalidSlot(usize),
}

impl NeedsError for ConsumeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotFood(_) | Self::InvalidSlot(_) => ErrorSeverity::Validation,
            Self::NotAllowed(_)
            | Self::EffectActive { .. }
            | Self::NotInInventory(_)
            | Self::Duplicate { .. }
            | Self::NoFreeSlot
            | Self::NotRefreshable(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFood(_) => "FOOD_NOT_FOOD",
            Self::NotAllowed(_) => "FOOD_NOT_ALLOWED",
            Self::EffectActive { .. } => "FOOD_EFFECT_ACTIVE",
            Self::NotInInventory(_) => "FOOD_NOT_IN_INVENTORY",
            Self::Duplicate { .. } => "FOOD_DUPLICATE",
            Self::NoFreeSlot => "FOOD_NO_FREE_SLOT",
            Self::NotRefreshable(_) => "FOOD_NOT_REFRESHABLE",
            Self::InvalidSlot(_) => "FOOD_INVALID_SLOT",
        }
    }
}

/// Collaborators and sibling state touched by a consumption.
pub struct ConsumeContext<'a> {
    pub world: &'a dyn WorldOracle,
    pub inventory: &'a mut dyn Inventory,
    pub status: &'a mut StatusEffects,
    pub vitals: &'a mut Vitals,
    pub events: &'a mut EventLog,
}

/// Scales a base stat by a slot's remaining-time curve; 0 for an inactive slot.
pub fn scaled_bonus(base: f32, slot: &FoodSlot) -> f32 {
    slot.scaled(base)
}

#[derive(Clone, Debug)]
pub struct FoodEffectTracker {
    slots: FoodSlots,
    config: FoodConfig,
    auto_consume_timer: IntervalTimer,
    regen_timer: IntervalTimer,
    dirty: bool,
}

impl FoodEffectTracker {
    pub fn new(config: FoodConfig) -> Self {
        Self {
            slots: FoodSlots::default(),
            auto_consume_timer: IntervalTimer::new(config.auto_consume_interval),
            regen_timer: IntervalTimer::new(config.regen_interval),
            config,
            dirty: false,
        }
    }

    pub fn config(&self) -> &FoodConfig {
        &self.config
    }

    pub fn slots(&self) -> &FoodSlots {
        &self.slots
    }

    /// Slot by index; `None` when out of range.
    pub fn slot(&self, index: usize) -> Option<&FoodSlot> {
        self.slots.get(index)
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_active()).count()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns and clears the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    // ========================================================================
    // Bonuses
    // ========================================================================

    pub fn total_health_bonus(&self) -> f32 {
        self.slots.iter().map(|s| s.scaled(s.health_bonus)).sum()
    }

    pub fn total_stamina_bonus(&self) -> f32 {
        self.slots.iter().map(|s| s.scaled(s.stamina_bonus)).sum()
    }

    pub fn total_eitr_bonus(&self) -> f32 {
        self.slots.iter().map(|s| s.scaled(s.eitr_bonus)).sum()
    }

    pub fn max_health(&self, base_health: f32) -> f32 {
        base_health + self.total_health_bonus()
    }

    // ========================================================================
    // Time
    // ========================================================================

    /// Counts every active slot down; clears the ones that ran out and clamps
    /// health to the reduced maximum. Returns the indices that expired.
    pub fn tick(
        &mut self,
        dt: f32,
        vitals: &mut Vitals,
        events: &mut EventLog,
    ) -> ArrayVec<usize, FOOD_SLOT_COUNT> {
        let dt = sanitize(dt).max(0.0);
        let mut expired = ArrayVec::new();
        let mut changed = false;

        for (index, slot) in self.slots.iter_mut().enumerate() {
            if !slot.is_active() {
                continue;
            }
            changed = true;
            slot.remaining_time -= dt;
            if slot.remaining_time <= 0.0 {
                let item = std::mem::take(&mut slot.item_name);
                slot.clear();
                info!(
                    target: "companion::food",
                    slot = index,
                    item = %item,
                    "Food effect expired"
                );
                events.push(NeedsEvent::FoodExpired { slot: index, item });
                expired.push(index);
            }
        }

        if changed {
            self.dirty = true;
            vitals.clamp_to(self.max_health(vitals.base_health));
        }
        expired
    }

    /// Health to restore from food regen this frame: the summed regen of
    /// active slots times `multiplier`, once per regen interval, zero otherwise.
    pub fn health_regen(&mut self, dt: f32, multiplier: f32) -> f32 {
        if !self.regen_timer.advance(dt) {
            return 0.0;
        }
        let regen: f32 = self
            .slots
            .iter()
            .filter(|s| s.is_active())
            .map(|s| s.regen_per_tick)
            .sum();
        regen * sanitize(multiplier).max(0.0)
    }

    // ========================================================================
    // Consumption
    // ========================================================================

    /// Boolean form of [`Self::consume`].
    pub fn try_consume(&mut self, item: &ItemDescriptor, ctx: &mut ConsumeContext<'_>) -> bool {
        self.consume(item, ctx).is_ok()
    }

    /// Eats `item` into a free slot, or into its own refreshable slot when the
    /// duplicate policy allows. Returns the slot written.
    pub fn consume(
        &mut self,
        item: &ItemDescriptor,
        ctx: &mut ConsumeContext<'_>,
    ) -> Result<usize, ConsumeError> {
        self.validate(item, ctx)?;

        let target = match self.active_slot_named(&item.name) {
            Some(index) => {
                let refreshable = self.slots[index].is_refreshable(self.config.refresh_threshold);
                match self.config.duplicate_policy {
                    DuplicatePolicy::BlockNonRefreshable if refreshable => index,
                    _ => {
                        return Err(ConsumeError::Duplicate {
                            item: item.name.clone(),
                            slot: index,
                        });
                    }
                }
            }
            None => self
                .slots
                .iter()
                .position(|s| !s.is_active())
                .ok_or(ConsumeError::NoFreeSlot)?,
        };

        let refreshed = self.slots[target].is_active();
        self.commit(item, target, refreshed, ctx)
    }

    /// Boolean form of [`Self::refresh`].
    pub fn try_refresh(
        &mut self,
        item: &ItemDescriptor,
        slot: usize,
        ctx: &mut ConsumeContext<'_>,
    ) -> bool {
        self.refresh(item, slot, ctx).is_ok()
    }

    /// Explicit refresh: replaces a refreshable slot with `item`, bypassing
    /// the duplicate check.
    pub fn refresh(
        &mut self,
        item: &ItemDescriptor,
        slot: usize,
        ctx: &mut ConsumeContext<'_>,
    ) -> Result<usize, ConsumeError> {
        let current = self.slots.get(slot).ok_or(ConsumeError::InvalidSlot(slot))?;
        if !current.is_refreshable(self.config.refresh_threshold) {
            return Err(ConsumeError::NotRefreshable(slot));
        }
        self.validate(item, ctx)?;
        self.commit(item, slot, true, ctx)
    }

    fn validate(&self, item: &ItemDescriptor, ctx: &ConsumeContext<'_>) -> Result<(), ConsumeError> {
        let burn_time = item.burn_time_seconds;
        if !item.is_food() || !burn_time.is_finite() || burn_time <= 0.0 {
            return Err(ConsumeError::NotFood(item.name.clone()));
        }
        if !ctx.world.consumption_allowed(item) {
            return Err(ConsumeError::NotAllowed(item.name.clone()));
        }
        if let Some(effect) = &item.attached_status_effect
            && ctx.status.has(&effect.name)
        {
            return Err(ConsumeError::EffectActive {
                item: item.name.clone(),
                effect: effect.name.clone(),
            });
        }
        if !ctx.inventory.contains(&item.name) {
            return Err(ConsumeError::NotInInventory(item.name.clone()));
        }
        Ok(())
    }

    fn commit(
        &mut self,
        item: &ItemDescriptor,
        index: usize,
        refreshed: bool,
        ctx: &mut ConsumeContext<'_>,
    ) -> Result<usize, ConsumeError> {
        if !ctx.inventory.remove_one(&item.name) {
            return Err(ConsumeError::NotInInventory(item.name.clone()));
        }

        self.slots[index] = FoodSlot {
            item_name: item.name.clone(),
            item_prefab_ref: item.prefab.clone(),
            health_bonus: sanitize(item.food_value).max(0.0),
            stamina_bonus: sanitize(item.stamina_value).max(0.0),
            eitr_bonus: sanitize(item.eitr_value).max(0.0),
            regen_per_tick: sanitize(item.regen_value).max(0.0),
            remaining_time: item.burn_time_seconds,
            total_time: item.burn_time_seconds,
        };

        if let Some(effect) = &item.attached_status_effect {
            ctx.status.add(&effect.name, effect.duration);
        }

        let max_health = self.max_health(ctx.vitals.base_health);
        ctx.vitals.heal(item.food_value, max_health);

        self.dirty = true;
        debug!(
            target: "companion::food",
            slot = index,
            item = %item.name,
            refreshed,
            health = ctx.vitals.health,
            "Food consumed"
        );
        ctx.events.push(NeedsEvent::FoodConsumed {
            slot: index,
            item: item.name.clone(),
            refreshed,
        });
        Ok(index)
    }

    // ========================================================================
    // Auto-consumption
    // ========================================================================

    /// Runs auto-consumption once per configured interval.
    pub fn tick_auto_consume(&mut self, dt: f32, ctx: &mut ConsumeContext<'_>) -> Option<usize> {
        if !self.config.auto_consume || !self.auto_consume_timer.advance(dt) {
            return None;
        }
        self.auto_consume(ctx)
    }

    /// Fills an empty slot if possible; otherwise refreshes the most depleted
    /// refreshable slot, preferring the same food. Returns the slot written.
    pub fn auto_consume(&mut self, ctx: &mut ConsumeContext<'_>) -> Option<usize> {
        let candidates = self.candidates(&*ctx.inventory);
        if candidates.is_empty() {
            return None;
        }

        if self.slots.iter().any(|s| !s.is_active()) {
            for item in &candidates {
                if let Ok(slot) = self.consume(item, ctx) {
                    return Some(slot);
                }
            }
        }

        let slot = self.most_depleted_refreshable()?;
        let current = self.slots[slot].item_name.clone();

        if let Some(same) = candidates.iter().find(|c| c.name == current)
            && let Ok(written) = self.refresh(same, slot, ctx)
        {
            return Some(written);
        }

        for item in candidates.iter().filter(|c| c.name != current) {
            if self.active_slot_named(&item.name).is_some() {
                continue;
            }
            if let Ok(written) = self.refresh(item, slot, ctx) {
                return Some(written);
            }
        }
        None
    }

    /// Active refreshable slot with the least time left.
    pub fn most_depleted_refreshable(&self) -> Option<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_refreshable(self.config.refresh_threshold))
            .min_by(|(_, a), (_, b)| a.remaining_time.total_cmp(&b.remaining_time))
            .map(|(index, _)| index)
    }

    /// Food in the inventory, in scan order, one descriptor per item name.
    fn candidates(&self, inventory: &dyn Inventory) -> Vec<ItemDescriptor> {
        let mut entries = inventory.find_all_items();
        if let FoodScanPolicy::DedicatedRowFirst { row } = self.config.scan_policy {
            // Stable: keeps inventory order inside each group.
            entries.sort_by_key(|entry| entry.row != row);
        }

        let mut seen: Vec<ItemDescriptor> = Vec::new();
        for entry in entries {
            if entry.item.is_food() && !seen.iter().any(|s| s.name == entry.item.name) {
                seen.push(entry.item);
            }
        }
        seen
    }

    fn active_slot_named(&self, name: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.is_active() && s.item_name == name)
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Overwrites one slot from decoded record data; out-of-range is a no-op.
    pub fn restore_slot(&mut self, index: usize, slot: FoodSlot) {
        if let Some(target) = self.slots.get_mut(index) {
            *target = if slot.is_active() {
                slot
            } else {
                FoodSlot::default()
            };
        }
    }

    pub fn clear_all(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.clear();
        }
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ComfortReading, InventoryEntry, RestTargetView};
    use crate::state::{EntityHandle, Position};

    struct OpenWorld;

    impl WorldOracle for OpenWorld {
        fn hostile_within(&self, _: Position, _: f32) -> bool {
            false
        }
        fn nearest_burning_fire(&self, _: Position, _: f32) -> Option<EntityHandle> {
            None
        }
        fn rest_target(&self, _: EntityHandle) -> Option<RestTargetView> {
            None
        }
        fn comfort_at(&self, _: Position) -> ComfortReading {
            ComfortReading::default()
        }
    }

    #[derive(Default)]
    struct Bag {
        stacks: Vec<(InventoryEntry, u32)>,
    }

    impl Bag {
        fn with(mut self, item: ItemDescriptor, row: u8, count: u32) -> Self {
            let column = self.stacks.len() as u8;
            self.stacks.push((InventoryEntry::new(item, row, column), count));
            self
        }

        fn count(&self, name: &str) -> u32 {
            self.stacks
                .iter()
                .filter(|(e, _)| e.item.name == name)
                .map(|(_, c)| *c)
                .sum()
        }
    }

    impl Inventory for Bag {
        fn find_all_items(&self) -> Vec<InventoryEntry> {
            self.stacks
                .iter()
                .filter(|(_, c)| *c > 0)
                .map(|(e, _)| e.clone())
                .collect()
        }
        fn contains(&self, name: &str) -> bool {
            self.count(name) > 0
        }
        fn remove_one(&mut self, name: &str) -> bool {
            match self
                .stacks
                .iter_mut()
                .find(|(e, c)| e.item.name == name && *c > 0)
            {
                Some((_, count)) => {
                    *count -= 1;
                    true
                }
                None => false,
            }
        }
    }

    struct Harness {
        bag: Bag,
        status: StatusEffects,
        vitals: Vitals,
        events: EventLog,
    }

    impl Harness {
        fn new(bag: Bag) -> Self {
            Self {
                bag,
                status: StatusEffects::empty(),
                vitals: Vitals::new(25.0),
                events: EventLog::new(),
            }
        }

        fn ctx(&mut self) -> ConsumeContext<'_> {
            ConsumeContext {
                world: &OpenWorld,
                inventory: &mut self.bag,
                status: &mut self.status,
                vitals: &mut self.vitals,
                events: &mut self.events,
            }
        }
    }

    fn meat() -> ItemDescriptor {
        ItemDescriptor::food("CookedMeat", 50.0, 0.0, 0.0, 1800.0)
    }

    fn berries() -> ItemDescriptor {
        ItemDescriptor::food("Raspberries", 7.0, 20.0, 0.0, 600.0)
    }

    fn honey() -> ItemDescriptor {
        ItemDescriptor::food("Honey", 8.0, 35.0, 0.0, 900.0)
    }

    fn mushroom() -> ItemDescriptor {
        ItemDescriptor::food("Mushroom", 15.0, 15.0, 0.0, 900.0)
    }

    #[test]
    fn consuming_meat_yields_full_bonus_then_decays_to_zero() {
        let mut h = Harness::new(Bag::default().with(meat(), 0, 1));
        let mut food = FoodEffectTracker::new(FoodConfig::default());

        assert!(food.try_consume(&meat(), &mut h.ctx()));
        assert!((food.total_health_bonus() - 50.0).abs() < 1e-4);
        assert_eq!(h.bag.count("CookedMeat"), 0);
        assert_eq!(h.vitals.health, 75.0);

        food.tick(1799.9, &mut h.vitals, &mut h.events);
        assert!(food.total_health_bonus() < 10.0);
        assert!(food.slot(0).is_some_and(FoodSlot::is_active));

        let expired = food.tick(0.2, &mut h.vitals, &mut h.events);
        assert_eq!(expired.as_slice(), &[0]);
        assert_eq!(food.total_health_bonus(), 0.0);
        assert_eq!(food.slot(0), Some(&FoodSlot::default()));
        assert_eq!(h.vitals.health, 25.0);
    }

    #[test]
    fn health_follows_shrinking_max() {
        let mut h = Harness::new(Bag::default().with(meat(), 0, 1));
        let mut food = FoodEffectTracker::new(FoodConfig::default());
        food.consume(&meat(), &mut h.ctx()).expect("consumes");

        food.tick(900.0, &mut h.vitals, &mut h.events);
        let max = food.max_health(25.0);
        assert!(max < 75.0);
        assert!((h.vitals.health - max).abs() < 1e-4);
    }

    #[test]
    fn non_food_is_rejected_without_side_effects() {
        let mut stone = ItemDescriptor::food("Stone", 0.0, 0.0, 0.0, 0.0);
        stone.category = crate::env::ItemCategory::Material;
        let mut h = Harness::new(Bag::default().with(stone.clone(), 0, 3));
        let mut food = FoodEffectTracker::new(FoodConfig::default());

        let err = food.consume(&stone, &mut h.ctx()).unwrap_err();
        assert_eq!(err, ConsumeError::NotFood("Stone".into()));
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(h.bag.count("Stone"), 3);
        assert!(!food.is_dirty());
    }

    #[test]
    fn unusable_burn_time_is_rejected_without_side_effects() {
        for burn_time in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY, 0.0] {
            let bad = ItemDescriptor::food("Bad", 10.0, 0.0, 0.0, burn_time);
            let mut h = Harness::new(Bag::default().with(bad.clone(), 0, 1));
            let mut food = FoodEffectTracker::new(FoodConfig::default());

            assert_eq!(
                food.consume(&bad, &mut h.ctx()),
                Err(ConsumeError::NotFood("Bad".into()))
            );
            assert_eq!(h.bag.count("Bad"), 1);
            assert_eq!(food.active_count(), 0);
            assert_eq!(food.slot(0), Some(&FoodSlot::default()));
            assert_eq!(food.max_health(25.0), 25.0);
        }
    }

    #[test]
    fn missing_item_is_rejected() {
        let mut h = Harness::new(Bag::default());
        let mut food = FoodEffectTracker::new(FoodConfig::default());
        assert_eq!(
            food.consume(&meat(), &mut h.ctx()),
            Err(ConsumeError::NotInInventory("CookedMeat".into()))
        );
    }

    #[test]
    fn active_status_effect_blocks_consumption() {
        let mead = ItemDescriptor::food("FireMead", 1.0, 0.0, 0.0, 60.0)
            .with_status_effect("FireResist", 600.0);
        let mut h = Harness::new(Bag::default().with(mead.clone(), 0, 2));
        let mut food = FoodEffectTracker::new(FoodConfig::default());

        assert!(food.try_consume(&mead, &mut h.ctx()));
        assert!(h.status.has("FireResist"));

        food.clear_all();
        assert!(matches!(
            food.consume(&mead, &mut h.ctx()),
            Err(ConsumeError::EffectActive { .. })
        ));
    }

    #[test]
    fn fresh_duplicate_is_rejected_under_both_policies() {
        for policy in [DuplicatePolicy::BlockNonRefreshable, DuplicatePolicy::BlockAll] {
            let config = FoodConfig {
                duplicate_policy: policy,
                ..FoodConfig::default()
            };
            let mut h = Harness::new(Bag::default().with(meat(), 0, 2));
            let mut food = FoodEffectTracker::new(config);
            food.consume(&meat(), &mut h.ctx()).expect("first");
            assert_eq!(
                food.consume(&meat(), &mut h.ctx()),
                Err(ConsumeError::Duplicate {
                    item: "CookedMeat".into(),
                    slot: 0
                })
            );
        }
    }

    #[test]
    fn refreshable_duplicate_depends_on_policy() {
        let mut lenient = FoodEffectTracker::new(FoodConfig::default());
        let mut h = Harness::new(Bag::default().with(meat(), 0, 2));
        lenient.consume(&meat(), &mut h.ctx()).expect("first");
        lenient.tick(1000.0, &mut h.vitals, &mut h.events);
        assert_eq!(lenient.consume(&meat(), &mut h.ctx()), Ok(0));
        assert_eq!(lenient.slot(0).map(|s| s.remaining_time), Some(1800.0));

        let strict_config = FoodConfig {
            duplicate_policy: DuplicatePolicy::BlockAll,
            ..FoodConfig::default()
        };
        let mut strict = FoodEffectTracker::new(strict_config);
        let mut h = Harness::new(Bag::default().with(meat(), 0, 2));
        strict.consume(&meat(), &mut h.ctx()).expect("first");
        strict.tick(1000.0, &mut h.vitals, &mut h.events);
        assert!(matches!(
            strict.consume(&meat(), &mut h.ctx()),
            Err(ConsumeError::Duplicate { .. })
        ));
        // The explicit refresh path bypasses the duplicate check.
        assert_eq!(strict.refresh(&meat(), 0, &mut h.ctx()), Ok(0));
    }

    #[test]
    fn refresh_requires_refreshable_slot() {
        let mut h = Harness::new(Bag::default().with(meat(), 0, 2));
        let mut food = FoodEffectTracker::new(FoodConfig::default());
        food.consume(&meat(), &mut h.ctx()).expect("first");

        assert_eq!(
            food.refresh(&meat(), 0, &mut h.ctx()),
            Err(ConsumeError::NotRefreshable(0))
        );
        assert_eq!(
            food.refresh(&meat(), 7, &mut h.ctx()),
            Err(ConsumeError::InvalidSlot(7))
        );
    }

    #[test]
    fn full_slots_reject_new_food() {
        let mut h = Harness::new(
            Bag::default()
                .with(meat(), 0, 1)
                .with(berries(), 0, 1)
                .with(honey(), 0, 1)
                .with(mushroom(), 0, 1),
        );
        let mut food = FoodEffectTracker::new(FoodConfig::default());
        for item in [meat(), berries(), honey()] {
            assert!(food.try_consume(&item, &mut h.ctx()));
        }
        assert_eq!(
            food.consume(&mushroom(), &mut h.ctx()),
            Err(ConsumeError::NoFreeSlot)
        );
    }

    #[test]
    fn auto_consume_fills_empty_slots_once_per_interval() {
        let mut h = Harness::new(Bag::default().with(meat(), 0, 5).with(berries(), 0, 5));
        let mut food = FoodEffectTracker::new(FoodConfig::default());

        assert_eq!(food.tick_auto_consume(0.5, &mut h.ctx()), None);
        assert_eq!(food.tick_auto_consume(0.5, &mut h.ctx()), Some(0));
        assert_eq!(food.tick_auto_consume(1.0, &mut h.ctx()), Some(1));
        // Both foods active and fresh: nothing else to do.
        assert_eq!(food.tick_auto_consume(1.0, &mut h.ctx()), None);
        assert_eq!(food.active_count(), 2);
    }

    #[test]
    fn dedicated_row_is_scanned_first() {
        let config = FoodConfig {
            scan_policy: FoodScanPolicy::DedicatedRowFirst { row: 3 },
            ..FoodConfig::default()
        };
        let mut h = Harness::new(Bag::default().with(meat(), 0, 1).with(honey(), 3, 1));
        let mut food = FoodEffectTracker::new(config);

        food.auto_consume(&mut h.ctx());
        assert_eq!(food.slot(0).map(|s| s.item_name.as_str()), Some("Honey"));
    }

    #[test]
    fn auto_consume_refreshes_most_depleted_slot_with_matching_food() {
        let mut h = Harness::new(
            Bag::default()
                .with(meat(), 0, 1)
                .with(berries(), 0, 2)
                .with(honey(), 0, 1),
        );
        let mut food = FoodEffectTracker::new(FoodConfig::default());
        for item in [meat(), berries(), honey()] {
            food.consume(&item, &mut h.ctx()).expect("fills");
        }

        // Berries (600s) pass the half-way mark first.
        food.tick(400.0, &mut h.vitals, &mut h.events);
        assert_eq!(food.most_depleted_refreshable(), Some(1));

        assert_eq!(food.auto_consume(&mut h.ctx()), Some(1));
        assert_eq!(food.slot(1).map(|s| s.remaining_time), Some(600.0));
        assert_eq!(h.bag.count("Raspberries"), 0);
    }

    #[test]
    fn auto_consume_refreshes_with_other_food_when_no_match() {
        let mut h = Harness::new(
            Bag::default()
                .with(meat(), 0, 1)
                .with(berries(), 0, 1)
                .with(honey(), 0, 1)
                .with(mushroom(), 0, 1),
        );
        let mut food = FoodEffectTracker::new(FoodConfig::default());
        for item in [meat(), berries(), honey()] {
            food.consume(&item, &mut h.ctx()).expect("fills");
        }
        food.tick(400.0, &mut h.vitals, &mut h.events);

        assert_eq!(food.auto_consume(&mut h.ctx()), Some(1));
        assert_eq!(food.slot(1).map(|s| s.item_name.as_str()), Some("Mushroom"));
    }

    #[test]
    fn regen_pulses_once_per_interval() {
        let mut h = Harness::new(Bag::default().with(meat().with_regen(2.0), 0, 1));
        let mut food = FoodEffectTracker::new(FoodConfig::default());
        food.consume(&meat().with_regen(2.0), &mut h.ctx()).expect("eats");

        assert_eq!(food.health_regen(5.0, 1.0), 0.0);
        assert_eq!(food.health_regen(5.0, 1.5), 3.0);
        assert_eq!(food.health_regen(1.0, 1.0), 0.0);
    }

    #[test]
    fn out_of_range_slot_access_is_neutral() {
        let mut food = FoodEffectTracker::new(FoodConfig::default());
        assert!(food.slot(3).is_none());
        food.restore_slot(9, FoodSlot::default());
        assert_eq!(food.active_count(), 0);
    }
}
