//! Per-skill progression ledger.
//!
//! Follows the vanilla curve: each raise adds `increase_step * factor *
//! skill_gain_rate` to the accumulator and a level is gained once the
//! accumulator reaches [`SkillRecord::next_level_requirement`]. The ledger is
//! sparse; skills never raised have no entry and read as level 0.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::codec::{Record, RecordWriter, decode_skills, encode_skills, keys};
use crate::env::{BalanceTable, RngOracle, SkillTable};
use crate::events::{EventLog, NeedsEvent};
use crate::state::{MAX_SKILL_LEVEL, SkillId, SkillRecord, sanitize};

/// Fraction of each level lost on death, before the global reduction rate.
const DEATH_PENALTY: f32 = 0.25;

/// Half-width of the band `random_skill_factor` samples from.
const RANDOM_FACTOR_SPREAD: f32 = 0.15;

#[derive(Clone, Debug)]
pub struct SkillProgressionTracker {
    ledger: BTreeMap<SkillId, SkillRecord>,
    table: Arc<SkillTable>,
    balance: Arc<BalanceTable>,
    dirty: bool,
}

impl SkillProgressionTracker {
    pub fn new(table: Arc<SkillTable>, balance: Arc<BalanceTable>) -> Self {
        Self {
            ledger: BTreeMap::new(),
            table,
            balance,
            dirty: false,
        }
    }

    /// Swaps in reloaded tables.
    pub fn reset_tables(&mut self, table: Arc<SkillTable>, balance: Arc<BalanceTable>) {
        self.table = table;
        self.balance = balance;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn record(&self, skill: SkillId) -> Option<&SkillRecord> {
        self.ledger.get(&skill)
    }

    pub fn level(&self, skill: SkillId) -> f32 {
        self.ledger.get(&skill).map_or(0.0, |r| r.level)
    }

    /// Stored skills in id order.
    pub fn iter(&self) -> impl Iterator<Item = (SkillId, &SkillRecord)> {
        self.ledger.iter().map(|(skill, record)| (*skill, record))
    }

    /// `level / 100` in `[0, 1]`; 0 for a skill never raised.
    pub fn skill_factor(&self, skill: SkillId) -> f32 {
        (self.level(skill) / MAX_SKILL_LEVEL).clamp(0.0, 1.0)
    }

    /// Uniform sample from a ±0.15 band around `lerp(0.4, 1.0, skill_factor)`,
    /// both bounds clamped to `[0, 1]`.
    pub fn random_skill_factor(&self, skill: SkillId, rng: &dyn RngOracle, seed: u64) -> f32 {
        let center = 0.4 + (1.0 - 0.4) * self.skill_factor(skill);
        let min = (center - RANDOM_FACTOR_SPREAD).clamp(0.0, 1.0);
        let max = (center + RANDOM_FACTOR_SPREAD).clamp(0.0, 1.0);
        rng.range_f32(seed, min, max)
    }

    /// Progress toward the next level in `[0, 1]`.
    pub fn accumulator_progress(&self, skill: SkillId) -> f32 {
        let Some(record) = self.ledger.get(&skill) else {
            return 0.0;
        };
        if record.level >= MAX_SKILL_LEVEL {
            return 1.0;
        }
        (record.accumulator / record.next_level_requirement()).clamp(0.0, 1.0)
    }

    /// Adds experience to a skill.
    ///
    /// `rested_xp_modifier` is the rested buff's skill bonus (0 without the
    /// buff). Returns whether the ledger changed.
    pub fn raise(
        &mut self,
        skill: SkillId,
        factor: f32,
        rested_xp_modifier: f32,
        events: &mut EventLog,
    ) -> bool {
        if self.level(skill) >= MAX_SKILL_LEVEL {
            return false;
        }
        let Some(step) = self.table.increase_step(skill) else {
            debug!(target: "companion::skills", %skill, "Skill missing from tuning table");
            return false;
        };

        let mut delta = step * sanitize(factor).max(0.0) * self.balance.skill_gain_rate;
        delta += delta * sanitize(rested_xp_modifier).max(0.0);
        if !(delta.is_finite() && delta > 0.0) {
            return false;
        }

        let record = self.ledger.entry(skill).or_default();
        record.accumulator += delta;
        if record.accumulator >= record.next_level_requirement() {
            record.level = (record.level + 1.0).min(MAX_SKILL_LEVEL);
            record.accumulator = 0.0;
            let level = record.level as u32;
            info!(target: "companion::skills", %skill, level, "Skill level up");
            events.push(NeedsEvent::SkillLevelUp { skill, level });
        }
        self.dirty = true;
        true
    }

    /// Death penalty: every level loses a quarter (scaled by the global
    /// reduction rate) and all progress toward the next level.
    pub fn on_death(&mut self) {
        let loss = DEATH_PENALTY * self.balance.skill_reduction_rate;
        for record in self.ledger.values_mut() {
            record.level = (record.level - record.level * loss).clamp(0.0, MAX_SKILL_LEVEL);
            record.accumulator = 0.0;
        }
        self.dirty = true;
        info!(target: "companion::skills", skills = self.ledger.len(), "Death penalty applied");
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    pub fn serialize(&self) -> String {
        encode_skills(&self.ledger)
    }

    /// Replaces the ledger from an encoded string; bad entries are dropped.
    pub fn load_str(&mut self, raw: &str) {
        let (skills, rejected) = decode_skills(raw);
        for error in rejected {
            warn!(target: "companion::skills", %error, "Dropping skill entry");
        }
        self.ledger = skills.into_iter().collect();
        self.dirty = false;
    }

    pub fn load(&mut self, record: &dyn Record) {
        self.load_str(record.get_str(keys::SKILLS).unwrap_or_default());
    }

    pub fn flush(&mut self, writer: &mut RecordWriter<'_>) {
        writer.set_str(keys::SKILLS, self.serialize());
        self.dirty = false;
    }
}
