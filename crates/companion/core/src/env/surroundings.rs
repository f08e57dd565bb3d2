use bitflags::bitflags;

use crate::state::{EntityHandle, Position};

bitflags! {
    /// Locomotion flags reported by the host for the current frame.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MotionFlags: u8 {
        /// Velocity is non-zero.
        const MOVING = 1 << 0;
        const SWIMMING = 1 << 1;
    }
}

/// Movement of the companion this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Motion {
    pub flags: MotionFlags,
    pub speed: f32,
    pub walk_speed: f32,
}

impl Motion {
    pub fn idle(walk_speed: f32) -> Self {
        Self {
            flags: MotionFlags::empty(),
            speed: 0.0,
            walk_speed,
        }
    }

    pub fn is_swimming(&self) -> bool {
        self.flags.contains(MotionFlags::SWIMMING | MotionFlags::MOVING)
    }

    /// Moving on land faster than `walk_speed * factor`.
    pub fn is_running(&self, factor: f32) -> bool {
        self.flags.contains(MotionFlags::MOVING)
            && !self.flags.contains(MotionFlags::SWIMMING)
            && self.speed > self.walk_speed * factor
    }
}

/// What the companion does when it is not resting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Behavior {
    Follow(EntityHandle),
    Hold(Position),
}

/// The controlling player as seen this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControllerView {
    pub handle: EntityHandle,
    pub position: Position,
    /// Seconds since the player started the sit gesture, `None` when not sitting.
    pub sitting_for: Option<f32>,
}

impl ControllerView {
    pub fn is_sitting(&self) -> bool {
        self.sitting_for.is_some()
    }
}

/// Per-frame situation of the companion, supplied by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surroundings {
    pub position: Position,
    pub motion: Motion,
    pub behavior: Behavior,
    pub controller: Option<ControllerView>,
}

impl Surroundings {
    pub fn at(position: Position, behavior: Behavior) -> Self {
        Self {
            position,
            motion: Motion::idle(1.0),
            behavior,
            controller: None,
        }
    }

    /// Following the given controller right now.
    pub fn is_following(&self, controller: EntityHandle) -> bool {
        self.behavior == Behavior::Follow(controller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swimming_requires_motion() {
        let still = Motion {
            flags: MotionFlags::SWIMMING,
            speed: 0.0,
            walk_speed: 2.0,
        };
        assert!(!still.is_swimming());

        let paddling = Motion {
            flags: MotionFlags::SWIMMING | MotionFlags::MOVING,
            ..still
        };
        assert!(paddling.is_swimming());
        assert!(!paddling.is_running(1.05));
    }

    #[test]
    fn running_is_speed_above_walk_factor() {
        let walking = Motion {
            flags: MotionFlags::MOVING,
            speed: 2.0,
            walk_speed: 2.0,
        };
        assert!(!walking.is_running(1.05));

        let jogging = Motion {
            speed: 2.2,
            ..walking
        };
        assert!(jogging.is_running(1.05));
    }
}
