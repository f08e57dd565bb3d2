//! The rested buff: granted after a warmup at a fire or immediately in bed,
//! lasting longer the more comfortable the surroundings.

use std::sync::Arc;

use tracing::{info, warn};

use crate::codec::{Record, RecordWriter, decode_rested, encode_rested, keys};
use crate::config::RestedConfig;
use crate::env::{BalanceTable, RestedModifiers};
use crate::events::{EventLog, NeedsEvent};
use crate::state::{RestedBuffState, sanitize};

#[derive(Clone, Debug)]
pub struct RestedBuffAccumulator {
    state: RestedBuffState,
    config: RestedConfig,
    balance: Arc<BalanceTable>,
    /// Copied out of `balance`; refreshed by [`Self::reset_cache`].
    modifiers: RestedModifiers,
    dirty: bool,
}

impl RestedBuffAccumulator {
    pub fn new(config: RestedConfig, balance: Arc<BalanceTable>) -> Self {
        Self {
            state: RestedBuffState::default(),
            config,
            modifiers: balance.rested,
            balance,
            dirty: false,
        }
    }

    pub fn state(&self) -> &RestedBuffState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn remaining(&self) -> f32 {
        self.state.remaining()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Swaps in a reloaded balance table and re-reads the cached multipliers.
    pub fn reset_cache(&mut self, balance: Arc<BalanceTable>) {
        self.modifiers = balance.rested;
        self.balance = balance;
    }

    /// Active multipliers, or [`RestedModifiers::NEUTRAL`] without the buff.
    pub fn modifiers(&self) -> RestedModifiers {
        if self.state.active {
            self.modifiers
        } else {
            RestedModifiers::NEUTRAL
        }
    }

    /// Factor applied to stamina regen: `1 + additive bonus`.
    pub fn stamina_regen_factor(&self) -> f32 {
        1.0 + self.modifiers().stamina_regen_additive_bonus
    }

    // ========================================================================
    // Warmup
    // ========================================================================

    /// Starts the sitting warmup. Already accumulating keeps the progress.
    pub fn start_resting(&mut self) {
        if !self.state.accumulating {
            self.state.accumulating = true;
            self.state.accum_timer = 0.0;
        }
    }

    pub fn stop_resting(&mut self) {
        self.state.accumulating = false;
        self.state.accum_timer = 0.0;
    }

    /// Grants or renews the buff for a comfort level.
    ///
    /// Returns false when an active buff already has at least the new
    /// duration left; renewal never shortens.
    pub fn apply(&mut self, comfort_level: i32, events: &mut EventLog) -> bool {
        let comfort_level = comfort_level.max(1);
        let duration = self.balance.rested_duration(comfort_level);
        if self.state.active && self.state.remaining() >= duration {
            return false;
        }

        self.state.active = true;
        self.state.total_duration = duration;
        self.state.elapsed = 0.0;
        self.state.comfort_level = comfort_level;
        self.dirty = true;

        info!(
            target: "companion::rested",
            comfort_level,
            duration,
            "Rested buff applied"
        );
        events.push(NeedsEvent::RestedApplied {
            comfort_level,
            duration,
        });
        true
    }

    /// Advances warmup and the active countdown. `comfort` is only queried
    /// when a warmup completes.
    pub fn tick(&mut self, dt: f32, comfort: impl FnOnce() -> i32, events: &mut EventLog) {
        let dt = sanitize(dt).max(0.0);

        if self.state.active {
            self.state.elapsed += dt;
            if self.state.elapsed >= self.state.total_duration {
                self.state = RestedBuffState {
                    accumulating: self.state.accumulating,
                    accum_timer: self.state.accum_timer,
                    ..RestedBuffState::default()
                };
                self.dirty = true;
                info!(target: "companion::rested", "Rested buff expired");
                events.push(NeedsEvent::RestedExpired);
            }
        }

        if self.state.accumulating {
            self.state.accum_timer += dt;
            if self.state.accum_timer >= self.config.warmup {
                self.state.accum_timer = 0.0;
                self.apply(comfort(), events);
            }
        }
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Replaces the replicated part of the state from the `rested` key.
    pub fn load(&mut self, record: &dyn Record) {
        let raw = record.get_str(keys::RESTED).unwrap_or_default();
        let decoded = decode_rested(raw).unwrap_or_else(|error| {
            warn!(target: "companion::rested", %error, "Dropping malformed rested record");
            RestedBuffState::default()
        });
        self.state = RestedBuffState {
            accumulating: self.state.accumulating,
            accum_timer: self.state.accum_timer,
            ..decoded
        };
        self.dirty = false;
    }

    pub fn flush(&mut self, writer: &mut RecordWriter<'_>) {
        writer.set_str(keys::RESTED, encode_rested(&self.state));
        self.dirty = false;
    }
}
