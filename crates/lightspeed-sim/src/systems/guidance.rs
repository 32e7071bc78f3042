//! Missile guidance.
//!
//! Missiles see the world through the same retarded-time perception as
//! players. A missile keeps its target only while the target is perceived
//! inside its agro radius, picks the first perceptible enemy ship when idle,
//! and steers at the *perceived* position through a one-shot route
//! override, leaving the queued route cursor untouched.

use tracing::debug;

use lightspeed_core::components::RouteWaypoint;
use lightspeed_core::enums::MissileEnd;
use lightspeed_core::events::SimEvent;
use lightspeed_core::types::{EntityId, Vec2};

use crate::perception::perceive_entity;
use crate::store::{ComponentKey, World};

const MISSILE_KEYS: [ComponentKey; 5] = [
    ComponentKey::Transform,
    ComponentKey::Movement,
    ComponentKey::Missile,
    ComponentKey::Owner,
    ComponentKey::RouteFollower,
];

const SHIP_KEYS: [ComponentKey; 3] = [
    ComponentKey::Transform,
    ComponentKey::Ship,
    ComponentKey::Owner,
];

/// Perceived position of `target` if it is inside `radius` of `from`.
fn perceived_within(
    world: &World,
    from: Vec2,
    target: EntityId,
    radius: f64,
    now: f64,
) -> Option<Vec2> {
    perceive_entity(from, target, world, now)
        .map(|snap| snap.pos)
        .filter(|pos| from.distance(*pos) <= radius)
}

pub fn run(world: &mut World, now: f64, events: &mut Vec<SimEvent>) {
    let ships = world.ids_with(&SHIP_KEYS);

    for id in world.ids_with(&MISSILE_KEYS) {
        if world.is_destroyed(id) {
            continue;
        }
        let (Some(tr), Some(mov), Some(mut missile), Some(owner), Some(mut follower)) = (
            world.transform(id),
            world.movement(id),
            world.missile(id),
            world.owner(id),
            world.route_follower(id),
        ) else {
            continue;
        };

        // 1. Lifetime
        if now - missile.launch_time >= missile.lifetime {
            world.mark_destroyed(id, now);
            if let Some(mut f) = world.route_follower_mut(id) {
                f.override_waypoint = None;
            }
            debug!(missile = %id, "missile expired");
            events.push(SimEvent::MissileEnded {
                missile: id,
                reason: MissileEnd::Expired,
            });
            continue;
        }

        let mut chase = None;

        // 2. Revalidate the current target
        if let Some(target) = missile.target {
            let enemy = world.exists(target)
                && !world.is_destroyed(target)
                && world.owner(target).is_some_and(|o| o != owner);
            chase = if enemy {
                perceived_within(world, tr.pos, target, missile.agro_radius, now)
            } else {
                None
            };
            if chase.is_none() {
                missile.target = None;
                follower.index = missile.return_index.take().unwrap_or(follower.index);
                debug!(missile = %id, target = %target, "target lost");
                events.push(SimEvent::TargetLost {
                    missile: id,
                    target,
                });
            }
        }

        // 3. Acquire
        if missile.target.is_none() {
            for &ship in &ships {
                if world.is_destroyed(ship)
                    || world.owner(ship).as_deref() == Some(owner.as_str())
                {
                    continue;
                }
                if let Some(pos) = perceived_within(world, tr.pos, ship, missile.agro_radius, now) {
                    chase = Some(pos);
                    missile.target = Some(ship);
                    missile.return_index = Some(follower.index);
                    debug!(missile = %id, target = %ship, "target acquired");
                    events.push(SimEvent::TargetAcquired {
                        missile: id,
                        target: ship,
                    });
                    break;
                }
            }
        }

        // 4. Steer
        follower.override_waypoint = chase.map(|pos| RouteWaypoint::new(pos, mov.max_speed));

        if let Some(mut m) = world.missile_mut(id) {
            *m = missile;
        }
        if let Some(mut f) = world.route_follower_mut(id) {
            *f = follower;
        }
    }
}
