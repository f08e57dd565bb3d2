use crate::state::{EntityHandle, Position};

/// Locomotion collaborator.
///
/// Pathfinding and movement happen outside the core. The rest state machine
/// only issues orders through this trait.
pub trait Locomotion {
    /// Resume following an entity (the controlling player).
    fn follow(&mut self, target: EntityHandle);

    /// Hold position at a patrol point.
    fn hold(&mut self, position: Position);

    /// Walk to a position and report arrival back via `on_arrived`.
    fn move_to(&mut self, position: Position);

    /// Stop and suppress movement until the next order.
    fn stop(&mut self);

    /// Turn to face a position.
    fn face(&mut self, position: Position);

    /// Snap position and rotation, overriding physics drift.
    fn pin(&mut self, position: Position, yaw: f32);
}
