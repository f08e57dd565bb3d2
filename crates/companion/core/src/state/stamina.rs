/// Stamina pool state.
///
/// `max` is never stored; the controller recomputes it from the food tracker
/// every tick and re-clamps `current` against it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StaminaState {
    pub current: f32,
    /// Toggled by the rest state machine; doubles regen.
    pub resting: bool,
    /// Toggled by locomotion or detected from motion each tick.
    pub running: bool,
    pub regen_delay_remaining: f32,
}
