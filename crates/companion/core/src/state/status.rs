//! Timed status effects carried by the companion.
//!
//! Food items may carry a one-shot buff that is applied on consumption. The set
//! also backs the "equivalent effect already active" consumption check.
//!
//! # Time-based Duration
//!
//! Effects store `remaining` seconds and are counted down by [`StatusEffects::tick`].
//! An effect is removed the moment its remaining time reaches zero.

use arrayvec::ArrayVec;

use crate::config::NeedsConfig;

/// Active status effects on the companion.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { NeedsConfig::MAX_STATUS_EFFECTS }>,
}

/// A single named status effect with its remaining duration.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusEffect {
    pub name: String,
    /// Seconds left before the effect expires.
    pub remaining: f32,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Checks if an effect with this name is active.
    pub fn has(&self, name: &str) -> bool {
        self.effects.iter().any(|e| e.name == name && e.remaining > 0.0)
    }

    /// Remaining seconds of an effect, or None if it is not active.
    pub fn remaining(&self, name: &str) -> Option<f32> {
        self.effects
            .iter()
            .find(|e| e.name == name && e.remaining > 0.0)
            .map(|e| e.remaining)
    }

    /// Adds an effect.
    ///
    /// If the effect already exists, extends to the longer remaining time.
    /// Returns false when the set is full and the effect could not be added.
    pub fn add(&mut self, name: &str, duration: f32) -> bool {
        if duration <= 0.0 || !duration.is_finite() {
            return false;
        }

        if let Some(existing) = self.effects.iter_mut().find(|e| e.name == name) {
            existing.remaining = existing.remaining.max(duration);
            return true;
        }

        self.effects
            .try_push(StatusEffect {
                name: name.to_owned(),
                remaining: duration,
            })
            .is_ok()
    }

    /// Removes an effect immediately.
    pub fn remove(&mut self, name: &str) {
        self.effects.retain(|e| e.name != name);
    }

    /// Counts every effect down and drops the ones that expired.
    pub fn tick(&mut self, dt: f32) {
        for effect in self.effects.iter_mut() {
            effect.remaining -= dt;
        }
        self.effects.retain(|e| e.remaining > 0.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
