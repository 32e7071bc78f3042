//! Room view: what one player is allowed to see, extracted under the room
//! lock for the transport layer. Everything except the player's own ship is
//! the *perceived* state, delayed by light travel time.

use serde::{Deserialize, Serialize};

use crate::components::RouteWaypoint;
use crate::heat::{HeatParams, HeatState};
use crate::missile_routes::MissileRoute;
use crate::types::{EntityId, Vec2};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomView {
    pub now: f64,
    pub world_width: f64,
    pub world_height: f64,
    /// The viewer's own ship, true state.
    pub me: Option<ShipView>,
    /// Other ships as perceived from the viewer's ship.
    pub ghosts: Vec<ShipView>,
    /// Missiles as perceived from the viewer's ship.
    pub missiles: Vec<MissileView>,
    /// Seconds until the viewer may launch again.
    pub missile_cooldown_remaining: f64,
    /// The viewer's planned missile routes.
    pub missile_routes: Vec<MissileRoute>,
    pub active_missile_route: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipView {
    pub entity: EntityId,
    pub owner: String,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Emission time of the sample.
    pub t: f64,
    pub hp: i32,
    pub kills: u32,
    pub is_self: bool,
    pub heat: Option<HeatView>,
    /// Only populated for the viewer's own ship.
    pub waypoints: Vec<RouteWaypoint>,
    pub route_index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissileView {
    pub entity: EntityId,
    pub owner: String,
    pub is_self: bool,
    pub pos: Vec2,
    pub vel: Vec2,
    pub t: f64,
    pub agro_radius: f64,
    pub launch_time: f64,
    pub expires_at: f64,
    pub target: Option<EntityId>,
    pub heat: Option<HeatView>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HeatView {
    pub params: HeatParams,
    pub state: HeatState,
}
