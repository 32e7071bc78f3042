//! Ship route editing.
//!
//! Index arguments are range-checked; anything out of range is a no-op.
//! Edits keep the follower cursor inside the route.

use lightspeed_core::components::RouteWaypoint;
use lightspeed_core::constants::SHIP_MAX_SPEED;
use lightspeed_core::missile_routes::MissileRouteSet;
use lightspeed_core::types::{EntityId, Vec2};

use crate::room::RoomState;

impl RoomState {
    pub fn append_ship_waypoint(&mut self, ship: EntityId, waypoint: RouteWaypoint) {
        if !waypoint.is_finite() {
            return;
        }
        if let Some(mut route) = self.world.route_mut(ship) {
            route.waypoints.push(waypoint);
        }
    }

    pub fn update_ship_waypoint_speed(&mut self, ship: EntityId, index: usize, speed: f64) {
        if !speed.is_finite() {
            return;
        }
        if let Some(mut route) = self.world.route_mut(ship) {
            if let Some(wp) = route.waypoints.get_mut(index) {
                wp.speed = speed.clamp(0.0, SHIP_MAX_SPEED);
            }
        }
    }

    pub fn move_ship_waypoint(&mut self, ship: EntityId, index: usize, pos: Vec2) {
        if !pos.is_finite() {
            return;
        }
        if let Some(mut route) = self.world.route_mut(ship) {
            if let Some(wp) = route.waypoints.get_mut(index) {
                wp.pos = pos;
            }
        }
    }

    /// Truncate the route to its first `index` waypoints.
    pub fn delete_ship_waypoints_from(&mut self, ship: EntityId, index: usize) {
        let len = match self.world.route_mut(ship) {
            Some(mut route) if index < route.waypoints.len() => {
                route.waypoints.truncate(index);
                index
            }
            _ => return,
        };
        if let Some(mut follower) = self.world.route_follower_mut(ship) {
            follower.index = follower.index.min(len);
        }
    }

    pub fn clear_ship_waypoints(&mut self, ship: EntityId) {
        if let Some(mut route) = self.world.route_mut(ship) {
            route.waypoints.clear();
        }
        if let Some(mut follower) = self.world.route_follower_mut(ship) {
            follower.index = 0;
        }
    }

    /// Freeze or release a ship in place.
    pub fn set_ship_hold(&mut self, ship: EntityId, hold: bool) {
        if let Some(mut follower) = self.world.route_follower_mut(ship) {
            follower.hold = hold;
        }
    }

    /// Missile route library of `player_id`, for the edit operations on
    /// [`MissileRouteSet`].
    pub fn missile_routes_mut(&mut self, player_id: &str) -> Option<&mut MissileRouteSet> {
        self.players.get_mut(player_id).map(|p| &mut p.missile_routes)
    }
}
