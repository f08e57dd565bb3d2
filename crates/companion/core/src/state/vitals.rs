/// Health pool of the companion.
///
/// Max health is not stored: it is `base_health` plus the food tracker's
/// current health bonus and is recomputed whenever food changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vitals {
    pub health: f32,
    pub base_health: f32,
}

impl Vitals {
    pub const fn new(base_health: f32) -> Self {
        Self {
            health: base_health,
            base_health,
        }
    }

    /// Heals by `amount`, never above `max`. Returns the amount actually healed.
    pub fn heal(&mut self, amount: f32, max: f32) -> f32 {
        if amount.is_nan() || amount <= 0.0 || self.health >= max {
            return 0.0;
        }
        let before = self.health;
        self.health = (self.health + amount).min(max);
        self.health - before
    }

    pub fn clamp_to(&mut self, max: f32) {
        if !self.health.is_finite() {
            self.health = 0.0;
        }
        self.health = self.health.clamp(0.0, max.max(0.0));
    }
}
