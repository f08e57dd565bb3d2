/// Opaque handle to an entity owned by the surrounding world (fire, bed, player).
///
/// Handles are never dereferenced by the core; liveness is always re-checked
/// through [`crate::env::WorldOracle`] before use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityHandle(pub u64);

/// World-space position in metres.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn within(&self, other: &Self, radius: f32) -> bool {
        self.distance(other) <= radius
    }

    /// Yaw (radians around the vertical axis) that faces `target` from `self`.
    pub fn yaw_towards(&self, target: &Self) -> f32 {
        (target.x - self.x).atan2(target.z - self.z)
    }
}

/// Attachment point of a bed or seat: where the agent is pinned and which way it faces.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttachPoint {
    pub position: Position,
    pub yaw: f32,
}

/// Replaces NaN and infinities with zero.
///
/// Legacy saves and cross-version item data may carry malformed floats; every
/// persistence and stamina path funnels external numbers through here first.
#[inline]
pub fn sanitize(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

/// Interval timer accumulating variable frame deltas into fixed-period firings.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IntervalTimer {
    period: f32,
    elapsed: f32,
}

impl IntervalTimer {
    pub const fn new(period: f32) -> Self {
        Self {
            period,
            elapsed: 0.0,
        }
    }

    /// Advances the timer. Returns true once per completed period; a long
    /// frame fires at most once so catch-up work never stacks.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += sanitize(dt).max(0.0);
        if self.elapsed >= self.period {
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn period(&self) -> f32 {
        self.period
    }
}
