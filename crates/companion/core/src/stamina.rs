//! Stamina pool: drain while running or swimming, delayed regen otherwise.

use tracing::{debug, trace};

use crate::codec::{Record, RecordWriter, decode_stamina, keys};
use crate::config::StaminaConfig;
use crate::env::{Motion, MotionFlags};
use crate::state::{StaminaState, sanitize};

#[derive(Clone, Debug)]
pub struct StaminaController {
    state: StaminaState,
    config: StaminaConfig,
    /// Max as of the last tick; see [`Self::max_with`].
    max: f32,
    sprint_requested: bool,
    dirty: bool,
}

impl StaminaController {
    /// Starts full, with no food bonus.
    pub fn new(config: StaminaConfig) -> Self {
        let max = sanitize(config.base_stamina).max(0.0);
        Self {
            state: StaminaState {
                current: max,
                ..StaminaState::default()
            },
            config,
            max,
            sprint_requested: false,
            dirty: false,
        }
    }

    pub fn state(&self) -> &StaminaState {
        &self.state
    }

    pub fn current(&self) -> f32 {
        self.state.current
    }

    /// Maximum computed on the last tick.
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Maximum for a given total food stamina bonus.
    pub fn max_with(&self, food_stamina_bonus: f32) -> f32 {
        sanitize(self.config.base_stamina).max(0.0) + sanitize(food_stamina_bonus).max(0.0)
    }

    /// Recomputes the max from the food bonus and re-clamps `current`.
    pub fn update_max(&mut self, food_stamina_bonus: f32) {
        self.max = self.max_with(food_stamina_bonus);
        self.clamp();
    }

    pub fn percentage(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.state.current / self.max
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_resting(&mut self, resting: bool) {
        if self.state.resting != resting {
            debug!(target: "companion::stamina", resting, "Resting regen toggled");
        }
        self.state.resting = resting;
    }

    /// Sprint held by locomotion. Still only drains while moving on land.
    pub fn set_running(&mut self, running: bool) {
        self.sprint_requested = running;
    }

    /// Advances one frame.
    ///
    /// `food_stamina_bonus` is the food tracker's current total and
    /// `regen_multiplier` the rested factor (1.0 without the buff).
    pub fn tick(&mut self, dt: f32, food_stamina_bonus: f32, motion: &Motion, regen_multiplier: f32) {
        let dt = sanitize(dt).max(0.0);
        let before = self.state.current;

        self.update_max(food_stamina_bonus);

        let swimming = motion.is_swimming();
        let moving_on_land = motion.flags.contains(MotionFlags::MOVING) && !swimming;
        self.state.running = motion.is_running(self.config.run_speed_factor)
            || (self.sprint_requested && moving_on_land);

        let drain_rate = if swimming {
            self.config.swim_drain
        } else if self.state.running {
            self.config.run_drain
        } else {
            0.0
        };

        if drain_rate > 0.0 {
            self.state.current -= drain_rate * dt;
            self.state.regen_delay_remaining = self.config.regen_delay;
        } else {
            self.state.regen_delay_remaining = (self.state.regen_delay_remaining - dt).max(0.0);
            if self.state.regen_delay_remaining <= 0.0 {
                let resting = if self.state.resting {
                    self.config.resting_regen_multiplier
                } else {
                    1.0
                };
                let bonus = sanitize(regen_multiplier).max(0.0);
                self.state.current += self.config.regen_rate * resting * bonus * dt;
            }
        }

        self.clamp();
        if self.state.current != before {
            self.dirty = true;
            trace!(
                target: "companion::stamina",
                current = self.state.current,
                max = self.max,
                running = self.state.running,
                swimming,
                "Stamina ticked"
            );
        }
    }

    /// Unconditional spend, clamped at zero. Resets the regen delay.
    pub fn drain(&mut self, amount: f32) {
        let amount = sanitize(amount).max(0.0);
        self.state.current = (self.state.current - amount).max(0.0);
        self.state.regen_delay_remaining = self.config.regen_delay;
        self.dirty = true;
    }

    /// Spends `amount` if available. Leaves state untouched otherwise.
    pub fn try_use(&mut self, amount: f32) -> bool {
        let amount = sanitize(amount).max(0.0);
        if self.state.current < amount {
            return false;
        }
        self.state.current -= amount;
        self.state.regen_delay_remaining = self.config.regen_delay;
        self.dirty = true;
        true
    }

    /// Unconditional gain, clamped at max.
    pub fn restore(&mut self, amount: f32) {
        let amount = sanitize(amount).max(0.0);
        self.state.current = (self.state.current + amount).min(self.max);
        self.dirty = true;
    }

    fn clamp(&mut self) {
        self.state.current = sanitize(self.state.current).clamp(0.0, self.max);
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Reads `stamina`, defaulting to the current max when absent or NaN.
    pub fn load(&mut self, record: &dyn Record) {
        self.state.current = decode_stamina(record, self.max);
        self.clamp();
        self.dirty = false;
    }

    pub fn flush(&mut self, writer: &mut RecordWriter<'_>) {
        writer.set_float(keys::STAMINA, self.state.current);
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{HostId, MemoryRecord, RecordValue};

    fn idle() -> Motion {
        Motion::idle(2.0)
    }

    fn running() -> Motion {
        Motion {
            flags: MotionFlags::MOVING,
            speed: 4.0,
            walk_speed: 2.0,
        }
    }

    #[test]
    fn two_uses_of_thirty_from_fifty() {
        let mut stamina = StaminaController::new(StaminaConfig::default());
        assert_eq!(stamina.current(), 50.0);

        assert!(stamina.try_use(30.0));
        assert_eq!(stamina.current(), 20.0);

        assert!(!stamina.try_use(30.0));
        assert_eq!(stamina.current(), 20.0);
    }

    #[test]
    fn running_drains_and_holds_regen() {
        let mut stamina = StaminaController::new(StaminaConfig::default());
        stamina.tick(1.0, 0.0, &running(), 1.0);
        assert_eq!(stamina.current(), 40.0);
        assert!(stamina.state().running);

        // Delay still pending for the first idle half second.
        stamina.tick(0.5, 0.0, &idle(), 1.0);
        assert_eq!(stamina.current(), 40.0);
        stamina.tick(0.5, 0.0, &idle(), 1.0);
        assert_eq!(stamina.current(), 43.0);
        stamina.tick(1.0, 0.0, &idle(), 1.0);
        assert_eq!(stamina.current(), 49.0);
    }

    #[test]
    fn swimming_in_place_does_not_drain() {
        let mut stamina = StaminaController::new(StaminaConfig::default());
        stamina.drain(20.0);
        let floating = Motion {
            flags: MotionFlags::SWIMMING,
            speed: 0.0,
            walk_speed: 2.0,
        };
        stamina.tick(2.0, 0.0, &floating, 1.0);
        assert!(stamina.current() > 30.0);

        let paddling = Motion {
            flags: MotionFlags::SWIMMING | MotionFlags::MOVING,
            ..floating
        };
        let before = stamina.current();
        stamina.tick(1.0, 0.0, &paddling, 1.0);
        assert_eq!(stamina.current(), before - 5.0);
    }

    #[test]
    fn resting_and_rested_scale_regen() {
        let config = StaminaConfig::default();
        let mut plain = StaminaController::new(config.clone());
        let mut rested = StaminaController::new(config);
        for s in [&mut plain, &mut rested] {
            s.drain(40.0);
            s.tick(1.0, 0.0, &idle(), 1.0);
        }
        rested.set_resting(true);
        plain.tick(1.0, 0.0, &idle(), 1.0);
        rested.tick(1.0, 0.0, &idle(), 2.0);
        assert_eq!(plain.current(), 22.0);
        assert_eq!(rested.current(), 40.0);
    }

    #[test]
    fn stays_within_bounds_when_max_shrinks() {
        let mut stamina = StaminaController::new(StaminaConfig::default());
        stamina.tick(0.0, 40.0, &idle(), 1.0);
        stamina.restore(100.0);
        assert_eq!(stamina.current(), 90.0);

        stamina.tick(0.1, 5.0, &idle(), 1.0);
        assert_eq!(stamina.max(), 55.0);
        assert!(stamina.current() <= stamina.max());

        stamina.drain(1000.0);
        assert_eq!(stamina.current(), 0.0);
        for dt in [0.0, 0.3, 7.0, f32::NAN] {
            stamina.tick(dt, f32::NAN, &running(), f32::NAN);
            assert!((0.0..=stamina.max()).contains(&stamina.current()));
        }
    }

    #[test]
    fn nan_amounts_are_ignored() {
        let mut stamina = StaminaController::new(StaminaConfig::default());
        assert!(stamina.try_use(f32::NAN));
        stamina.drain(f32::NAN);
        stamina.restore(f32::NAN);
        assert_eq!(stamina.current(), 50.0);
    }

    #[test]
    fn load_defaults_to_max_for_missing_or_nan() {
        let mut record = MemoryRecord::new(HostId(1));
        let mut stamina = StaminaController::new(StaminaConfig::default());
        stamina.drain(20.0);
        stamina.load(&record);
        assert_eq!(stamina.current(), 50.0);

        record.put(keys::STAMINA, RecordValue::Float(f32::NAN));
        stamina.drain(20.0);
        stamina.load(&record);
        assert_eq!(stamina.current(), 50.0);

        record.put(keys::STAMINA, RecordValue::Float(12.5));
        stamina.load(&record);
        assert_eq!(stamina.current(), 12.5);
    }
}
