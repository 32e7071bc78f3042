//! Route following.
//!
//! Moves every live entity toward its current waypoint (or the one-shot
//! override installed by guidance), then records a history sample. The
//! sample is pushed on every path, stalled or idle included, so lookups
//! always have a current entry.

use lightspeed_core::components::{Route, RouteFollower, Transform};
use lightspeed_core::constants::{MIN_MOVING_SPEED, SHIP_STOP_EPS};
use lightspeed_core::types::{Snapshot, Vec2, WorldBounds};

use crate::store::{ComponentKey, World};

const KEYS: [ComponentKey; 4] = [
    ComponentKey::Transform,
    ComponentKey::Movement,
    ComponentKey::Route,
    ComponentKey::RouteFollower,
];

/// One tick of motion for a single entity.
pub fn advance(
    tr: &mut Transform,
    follower: &mut RouteFollower,
    route: &Route,
    max_speed: f64,
    dt: f64,
    stalled: bool,
) {
    if stalled || follower.hold {
        tr.vel = Vec2::ZERO;
        return;
    }

    let (target, from_override) = match follower.override_waypoint.take() {
        Some(wp) => (wp, true),
        None => match route.waypoints.get(follower.index) {
            Some(wp) => (*wp, false),
            None => {
                tr.vel = Vec2::ZERO;
                follower.index = follower.index.min(route.waypoints.len());
                return;
            }
        },
    };

    let speed = target.speed.clamp(0.0, max_speed);
    let to_target = target.pos - tr.pos;
    let distance = to_target.length();

    if distance <= SHIP_STOP_EPS || distance <= speed * dt || speed <= MIN_MOVING_SPEED {
        tr.pos = target.pos;
        tr.vel = Vec2::ZERO;
        if !from_override {
            follower.index += 1;
        }
    } else {
        tr.vel = to_target / distance * speed;
        tr.pos += tr.vel * dt;
    }
}

pub fn run(world: &mut World, now: f64, dt: f64, bounds: &WorldBounds) {
    for id in world.ids_with(&KEYS) {
        if world.is_destroyed(id) {
            continue;
        }
        let (Some(mut tr), Some(movement), Some(mut follower)) = (
            world.transform(id),
            world.movement(id),
            world.route_follower(id),
        ) else {
            continue;
        };
        let stalled = world.heat(id).is_some_and(|h| h.is_stalled(now));

        if let Some(route) = world.route(id) {
            advance(&mut tr, &mut follower, &route, movement.max_speed, dt, stalled);
        }
        tr.pos = bounds.clamp(tr.pos);

        if let Some(mut t) = world.transform_mut(id) {
            *t = tr;
        }
        if let Some(mut f) = world.route_follower_mut(id) {
            *f = follower;
        }
        if let Some(history) = world.history(id) {
            history.push(Snapshot::new(now, tr.pos, tr.vel));
        }
    }
}
