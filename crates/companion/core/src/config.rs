/// Needs engine configuration: tunable rates, intervals and policies.
///
/// Every subsystem reads its constants from here; nothing in the core uses
/// magic numbers. Values loaded from data files replace the defaults wholesale.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NeedsConfig {
    pub vitals: VitalsConfig,
    pub food: FoodConfig,
    pub stamina: StaminaConfig,
    pub rest: RestConfig,
    pub rested: RestedConfig,
    pub sync: SyncConfig,
}

impl NeedsConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_STATUS_EFFECTS: usize = 8;

    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VitalsConfig {
    pub base_health: f32,
}

impl VitalsConfig {
    pub const DEFAULT_BASE_HEALTH: f32 = 25.0;
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            base_health: Self::DEFAULT_BASE_HEALTH,
        }
    }
}

/// Where auto-consumption looks for food.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FoodScanPolicy {
    /// Scan a designated inventory row first, then the whole inventory.
    DedicatedRowFirst { row: u8 },
    /// Scan the whole inventory in order.
    WholeInventory,
}

/// How an item matching an already-active slot is treated outside the explicit
/// refresh path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DuplicatePolicy {
    /// Blocked while the matching slot is not yet refreshable; a refreshable
    /// matching slot is replaced in place.
    BlockNonRefreshable,
    /// Blocked whenever a matching slot is active.
    BlockAll,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FoodConfig {
    pub auto_consume: bool,
    pub auto_consume_interval: f32,
    /// Fraction of total time below which an active slot may be refreshed.
    pub refresh_threshold: f32,
    /// Period of the food health regen pulse.
    pub regen_interval: f32,
    pub scan_policy: FoodScanPolicy,
    pub duplicate_policy: DuplicatePolicy,
}

impl FoodConfig {
    pub const DEFAULT_AUTO_CONSUME_INTERVAL: f32 = 1.0;
    pub const DEFAULT_REFRESH_THRESHOLD: f32 = 0.5;
    pub const DEFAULT_REGEN_INTERVAL: f32 = 10.0;
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            auto_consume: true,
            auto_consume_interval: Self::DEFAULT_AUTO_CONSUME_INTERVAL,
            refresh_threshold: Self::DEFAULT_REFRESH_THRESHOLD,
            regen_interval: Self::DEFAULT_REGEN_INTERVAL,
            scan_policy: FoodScanPolicy::WholeInventory,
            duplicate_policy: DuplicatePolicy::BlockNonRefreshable,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StaminaConfig {
    pub base_stamina: f32,
    /// Drain per second while running.
    pub run_drain: f32,
    /// Drain per second while swimming.
    pub swim_drain: f32,
    /// Regen per second once the delay elapsed.
    pub regen_rate: f32,
    /// Seconds of no drain before regen starts.
    pub regen_delay: f32,
    /// Speed above `walk_speed * run_speed_factor` counts as running.
    pub run_speed_factor: f32,
    pub resting_regen_multiplier: f32,
}

impl Default for StaminaConfig {
    fn default() -> Self {
        Self {
            base_stamina: 50.0,
            run_drain: 10.0,
            swim_drain: 5.0,
            regen_rate: 6.0,
            regen_delay: 1.0,
            run_speed_factor: 1.05,
            resting_regen_multiplier: 2.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RestConfig {
    pub organic_check_interval: f32,
    /// How recently the controlling player must have started sitting.
    pub sit_gesture_window: f32,
    pub player_radius: f32,
    pub fire_radius: f32,
    pub hostile_radius: f32,
    /// Directed rests closer than this commit without navigating.
    pub commit_distance: f32,
    pub nav_timeout: f32,
    pub heal_interval: f32,
    pub heal_amount: f32,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            organic_check_interval: 1.0,
            sit_gesture_window: 5.0,
            player_radius: 6.0,
            fire_radius: 5.0,
            hostile_radius: 20.0,
            commit_distance: 2.5,
            nav_timeout: 15.0,
            heal_interval: 1.0,
            heal_amount: 2.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RestedConfig {
    /// Continuous sitting needed before the buff is granted.
    pub warmup: f32,
}

impl Default for RestedConfig {
    fn default() -> Self {
        Self { warmup: 20.0 }
    }
}

/// Owner flush and mirror poll cadence.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SyncConfig {
    pub food_flush_interval: f32,
    pub skills_flush_interval: f32,
    pub stamina_flush_interval: f32,
    pub poll_interval: f32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            food_flush_interval: 5.0,
            skills_flush_interval: 5.0,
            stamina_flush_interval: 1.0,
            poll_interval: 0.5,
        }
    }
}
