//! Per-player library of named missile routes.
//!
//! A player plans missile flight paths ahead of time and launches along
//! the active one. The set is never empty: it starts with "Route 1", and
//! deleting the last route only clears its waypoints.

use serde::{Deserialize, Serialize};

use crate::components::RouteWaypoint;
use crate::constants::{MISSILE_MAX_SPEED, MISSILE_MIN_SPEED};
use crate::types::Vec2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissileRoute {
    pub id: String,
    pub name: String,
    pub waypoints: Vec<RouteWaypoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissileRouteSet {
    routes: Vec<MissileRoute>,
    active: String,
    next_id: u64,
}

impl Default for MissileRouteSet {
    fn default() -> Self {
        Self::new()
    }
}

impl MissileRouteSet {
    pub fn new() -> Self {
        let mut set = Self {
            routes: Vec::new(),
            active: String::new(),
            next_id: 0,
        };
        let id = set.alloc_id();
        set.routes.push(MissileRoute {
            id: id.clone(),
            name: "Route 1".to_owned(),
            waypoints: Vec::new(),
        });
        set.active = id;
        set
    }

    fn alloc_id(&mut self) -> String {
        self.next_id += 1;
        format!("mr-{}", self.next_id)
    }

    pub fn routes(&self) -> &[MissileRoute] {
        &self.routes
    }

    pub fn active_id(&self) -> &str {
        &self.active
    }

    pub fn get(&self, id: &str) -> Option<&MissileRoute> {
        self.routes.iter().find(|r| r.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut MissileRoute> {
        self.routes.iter_mut().find(|r| r.id == id)
    }

    /// The active route, falling back to the first.
    pub fn active(&self) -> Option<&MissileRoute> {
        self.get(&self.active).or_else(|| self.routes.first())
    }

    /// First unused "Route N" name, compared case-insensitively.
    fn generate_name(&self) -> String {
        let mut n = self.routes.len() + 1;
        loop {
            let candidate = format!("Route {n}");
            if !self
                .routes
                .iter()
                .any(|r| r.name.eq_ignore_ascii_case(&candidate))
            {
                return candidate;
            }
            n += 1;
        }
    }

    /// Add an empty route and make it active. A blank name gets a
    /// generated one. Returns the new id.
    pub fn add(&mut self, name: &str) -> String {
        let trimmed = name.trim();
        let name = if trimmed.is_empty() {
            self.generate_name()
        } else {
            trimmed.to_owned()
        };
        let id = self.alloc_id();
        self.routes.push(MissileRoute {
            id: id.clone(),
            name,
            waypoints: Vec::new(),
        });
        self.active = id.clone();
        id
    }

    pub fn rename(&mut self, id: &str, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return false;
        }
        match self.get_mut(id) {
            Some(route) => {
                route.name = trimmed.to_owned();
                true
            }
            None => false,
        }
    }

    /// Remove a route. The last remaining route is cleared instead.
    pub fn delete(&mut self, id: &str) -> bool {
        let Some(idx) = self.routes.iter().position(|r| r.id == id) else {
            return false;
        };
        if self.routes.len() <= 1 {
            self.routes[idx].waypoints.clear();
            return true;
        }
        self.routes.remove(idx);
        if self.active == id {
            self.active = self.routes[0].id.clone();
        }
        true
    }

    pub fn clear(&mut self, id: &str) -> bool {
        match self.get_mut(id) {
            Some(route) => {
                route.waypoints.clear();
                true
            }
            None => false,
        }
    }

    pub fn set_active(&mut self, id: &str) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.active = id.to_owned();
        true
    }

    /// Append a waypoint. A non-positive speed is stored as zero, which
    /// flies at the missile's own speed at launch.
    pub fn add_waypoint(&mut self, id: &str, waypoint: RouteWaypoint) -> bool {
        if !waypoint.is_finite() {
            return false;
        }
        match self.get_mut(id) {
            Some(route) => {
                let speed = if waypoint.speed > 0.0 {
                    waypoint.speed.clamp(MISSILE_MIN_SPEED, MISSILE_MAX_SPEED)
                } else {
                    0.0
                };
                route.waypoints.push(RouteWaypoint::new(waypoint.pos, speed));
                true
            }
            None => false,
        }
    }

    pub fn update_waypoint_speed(&mut self, id: &str, index: usize, speed: f64) -> bool {
        if !speed.is_finite() {
            return false;
        }
        match self.get_mut(id).and_then(|r| r.waypoints.get_mut(index)) {
            Some(wp) => {
                wp.speed = speed.clamp(MISSILE_MIN_SPEED, MISSILE_MAX_SPEED);
                true
            }
            None => false,
        }
    }

    pub fn move_waypoint(&mut self, id: &str, index: usize, pos: Vec2) -> bool {
        if !pos.is_finite() {
            return false;
        }
        match self.get_mut(id).and_then(|r| r.waypoints.get_mut(index)) {
            Some(wp) => {
                wp.pos = pos;
                true
            }
            None => false,
        }
    }

    /// Remove the single waypoint at `index`.
    pub fn delete_waypoint(&mut self, id: &str, index: usize) -> bool {
        match self.get_mut(id) {
            Some(route) if index < route.waypoints.len() => {
                route.waypoints.remove(index);
                true
            }
            _ => false,
        }
    }
}
