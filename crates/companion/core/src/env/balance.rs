//! Process-wide balance constants.
//!
//! The table is read-only after load and shared by `Arc` between every agent
//! on a host. A world reload swaps in a new table; subsystems that cache values
//! from it expose a reset hook (see [`crate::rested::RestedBuffAccumulator::reset_cache`]).

/// Multipliers granted while the rested buff is active.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RestedModifiers {
    pub health_regen_multiplier: f32,
    /// Added to 1.0 and multiplied into stamina regen.
    pub stamina_regen_additive_bonus: f32,
    pub eitr_regen_multiplier: f32,
    /// Fraction of each skill gain added again as a bonus.
    pub skill_xp_modifier: f32,
}

impl Default for RestedModifiers {
    fn default() -> Self {
        Self {
            health_regen_multiplier: 1.5,
            stamina_regen_additive_bonus: 1.0,
            eitr_regen_multiplier: 1.5,
            skill_xp_modifier: 0.5,
        }
    }
}

impl RestedModifiers {
    /// Modifiers that change nothing, used while the buff is inactive.
    pub const NEUTRAL: Self = Self {
        health_regen_multiplier: 1.0,
        stamina_regen_additive_bonus: 0.0,
        eitr_regen_multiplier: 1.0,
        skill_xp_modifier: 0.0,
    };
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BalanceTable {
    /// Global multiplier on every skill gain.
    pub skill_gain_rate: f32,
    /// Global multiplier on the death penalty.
    pub skill_reduction_rate: f32,
    pub rested: RestedModifiers,
    /// Rested duration at comfort level 1, in seconds.
    pub rested_base_ttl: f32,
    /// Extra rested seconds per comfort level above 1.
    pub rested_ttl_per_comfort_level: f32,
}

impl Default for BalanceTable {
    fn default() -> Self {
        Self {
            skill_gain_rate: 1.0,
            skill_reduction_rate: 1.0,
            rested: RestedModifiers::default(),
            rested_base_ttl: 480.0,
            rested_ttl_per_comfort_level: 60.0,
        }
    }
}

impl BalanceTable {
    /// Rested duration for a comfort level: `base + (comfort - 1) * per_level`.
    pub fn rested_duration(&self, comfort_level: i32) -> f32 {
        let extra_levels = (comfort_level.max(1) - 1) as f32;
        self.rested_base_ttl + extra_levels * self.rested_ttl_per_comfort_level
    }
}
