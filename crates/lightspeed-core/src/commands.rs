//! Commands issued to the simulation by AI modules (and, through the same
//! path, by the transport layer on behalf of human players).
//!
//! Commands are queued and applied for their player at the next tick
//! boundary. The core never decides *when* to issue them.

use serde::{Deserialize, Serialize};

use crate::components::RouteWaypoint;
use crate::missile::MissileConfig;

/// All actions a controller may take for its player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AiCommand {
    /// Replace the player's ship route and rewind its cursor.
    SetShipRoute { waypoints: Vec<RouteWaypoint> },
    /// Drop every queued ship waypoint.
    ClearShipRoute,
    /// Launch a missile from the player's ship along `waypoints`.
    /// Waypoints with a non-positive speed fly at the missile's speed.
    LaunchMissile {
        config: MissileConfig,
        waypoints: Vec<RouteWaypoint>,
    },
}
