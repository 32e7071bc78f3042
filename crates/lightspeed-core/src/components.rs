//! ECS components stored in the entity store.
//!
//! Components are plain data structs. Game logic lives in systems; the
//! only methods here are small state predicates.

use serde::{Deserialize, Serialize};

use crate::heat::{HeatParams, HeatState};
use crate::types::{EntityId, Vec2};

/// Kinematic state, mutated once per tick by exactly one system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Speed cap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub max_speed: f64,
}

/// Marks an entity as a ship and carries its hull.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub hp: i32,
}

/// A route point with the speed to travel toward it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteWaypoint {
    pub pos: Vec2,
    pub speed: f64,
}

impl RouteWaypoint {
    pub fn new(pos: Vec2, speed: f64) -> Self {
        Self { pos, speed }
    }

    pub fn is_finite(&self) -> bool {
        self.pos.is_finite() && self.speed.is_finite()
    }
}

/// Queued waypoints, consumed in order by the route follower.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub waypoints: Vec<RouteWaypoint>,
}

/// Cursor into `Route`, plus the one-shot override installed by guidance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteFollower {
    pub index: usize,
    /// Freezes motion while set.
    pub hold: bool,
    /// Consumed by the next route-follow pass without moving `index`.
    pub override_waypoint: Option<RouteWaypoint>,
}

/// Seeker state of a missile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Missile {
    pub agro_radius: f64,
    pub launch_time: f64,
    pub lifetime: f64,
    /// Ship currently chased, if any.
    pub target: Option<EntityId>,
    /// Route cursor to resume when the target is lost.
    pub return_index: Option<usize>,
}

impl Missile {
    pub fn expires_at(&self) -> f64 {
        self.launch_time + self.lifetime
    }
}

/// Controlling player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub player_id: String,
}

/// Thermal model of a ship or missile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Heat {
    pub params: HeatParams,
    pub state: HeatState,
}

impl Heat {
    pub fn new(params: HeatParams) -> Self {
        Self {
            params,
            state: HeatState::default(),
        }
    }

    /// Whether the entity is stalled at time `now`.
    pub fn is_stalled(&self, now: f64) -> bool {
        now < self.state.stall_until
    }
}

/// Marks an entity inert as of `at`. The entity stays addressable so that
/// observers can still perceive its last moments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Destroyed {
    pub at: f64,
}
