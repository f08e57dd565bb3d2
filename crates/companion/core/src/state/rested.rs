/// Rested buff state.
///
/// While `accumulating`, `accum_timer` counts warmup seconds toward an
/// automatic grant. Once `active`, `elapsed` counts toward `total_duration`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RestedBuffState {
    pub accumulating: bool,
    pub accum_timer: f32,
    pub active: bool,
    pub total_duration: f32,
    pub elapsed: f32,
    pub comfort_level: i32,
}

impl RestedBuffState {
    /// Seconds left on an active buff, zero otherwise.
    pub fn remaining(&self) -> f32 {
        if self.active {
            (self.total_duration - self.elapsed).max(0.0)
        } else {
            0.0
        }
    }
}
