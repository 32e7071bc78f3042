//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 2D vector in map units (x = right, y = down on the client map).
pub type Vec2 = glam::DVec2;

/// Opaque entity handle. Ids increase monotonically and are never reused.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One time-stamped kinematic sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Simulation time of the sample (seconds).
    pub t: f64,
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Snapshot {
    pub fn new(t: f64, pos: Vec2, vel: Vec2) -> Self {
        Self { t, pos, vel }
    }

    /// A stationary sample.
    pub fn at_rest(t: f64, pos: Vec2) -> Self {
        Self {
            t,
            pos,
            vel: Vec2::ZERO,
        }
    }

    /// Linear blend toward `other` by `alpha`, position and velocity independently.
    pub fn lerp(&self, other: &Snapshot, alpha: f64) -> Snapshot {
        Snapshot {
            t: self.t + alpha * (other.t - self.t),
            pos: self.pos.lerp(other.pos, alpha),
            vel: self.vel.lerp(other.vel, alpha),
        }
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub now: f64,
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.now += self.dt();
    }
}

/// Axis-aligned world rectangle `[0, width] x [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f64,
    pub height: f64,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            width: crate::constants::WORLD_W,
            height: crate::constants::WORLD_H,
        }
    }
}

impl WorldBounds {
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        Vec2::new(pos.x.clamp(0.0, self.width), pos.y.clamp(0.0, self.height))
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}
