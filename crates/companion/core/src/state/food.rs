//! Food slot storage.
//!
//! The companion carries exactly [`FOOD_SLOT_COUNT`] slots. A slot's index is its
//! identity: it is what the record key `food_slot_<n>` refers to and what the
//! refresh path targets.

/// Number of concurrent food effects.
pub const FOOD_SLOT_COUNT: usize = 3;

/// Exponent of the vanilla front-loaded food decay curve.
///
/// Must match the host game's scaling; changing it breaks compatibility.
pub const FOOD_DECAY_EXPONENT: f32 = 0.3;

/// One consumed food effect.
///
/// Stat values are copied verbatim from the item at consumption time. An
/// inactive slot has every field at its default.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FoodSlot {
    pub item_name: String,
    /// Display/identity only.
    pub item_prefab_ref: String,
    pub health_bonus: f32,
    pub stamina_bonus: f32,
    pub eitr_bonus: f32,
    pub regen_per_tick: f32,
    pub remaining_time: f32,
    pub total_time: f32,
}

impl FoodSlot {
    pub fn is_active(&self) -> bool {
        self.remaining_time > 0.0 && !self.item_name.is_empty()
    }

    /// Active and past the refresh threshold fraction of its duration.
    pub fn is_refreshable(&self, threshold: f32) -> bool {
        self.is_active() && self.remaining_time < self.total_time * threshold
    }

    /// Scales a base stat by the remaining-time curve.
    ///
    /// `base * (remaining / max(1, total))^0.3`, zero for an inactive slot.
    pub fn scaled(&self, base: f32) -> f32 {
        if !self.is_active() {
            return 0.0;
        }
        let fraction = (self.remaining_time / self.total_time.max(1.0)).clamp(0.0, 1.0);
        base * fraction.powf(FOOD_DECAY_EXPONENT)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

pub type FoodSlots = [FoodSlot; FOOD_SLOT_COUNT];
