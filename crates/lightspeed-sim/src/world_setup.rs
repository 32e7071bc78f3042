//! Entity spawn factories.
//!
//! Ships and missiles are assembled here with their full component sets so
//! every system finds what it queries for.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use lightspeed_core::components::*;
use lightspeed_core::constants::{SHIP_MAX_HP, SHIP_MAX_SPEED};
use lightspeed_core::heat::HeatParams;
use lightspeed_core::missile::MissileConfig;
use lightspeed_core::types::{EntityId, Snapshot, Vec2, WorldBounds};

use crate::history::History;
use crate::store::World;

/// Spawn a ship at rest at `pos`, seeded with one history sample at `now`.
pub fn spawn_ship(
    world: &mut World,
    owner: &str,
    pos: Vec2,
    now: f64,
    heat: HeatParams,
) -> EntityId {
    let id = world.new_entity();
    world.set_component(id, Transform { pos, vel: Vec2::ZERO });
    world.set_component(
        id,
        Movement {
            max_speed: SHIP_MAX_SPEED,
        },
    );
    world.set_component(id, Ship { hp: SHIP_MAX_HP });
    world.set_component(id, Route::default());
    world.set_component(id, RouteFollower::default());
    world.set_component(
        id,
        Owner {
            player_id: owner.to_owned(),
        },
    );
    world.set_component(id, History::starting_at(Snapshot::at_rest(now, pos)));
    world.set_component(id, Heat::new(heat));
    id
}

/// Launch a missile from `ship`.
///
/// The missile starts at the ship's position with zero velocity and
/// inherits a copy of the ship's history, so every observer sees it leave
/// from where they currently perceive the ship. Waypoints with a
/// non-positive speed fly at the missile's speed. `config` must already be
/// sanitised. Returns `None` when the ship has no position.
pub fn spawn_missile(
    world: &mut World,
    owner: &str,
    ship: EntityId,
    config: &MissileConfig,
    waypoints: &[RouteWaypoint],
    now: f64,
) -> Option<EntityId> {
    let pos = world.transform(ship)?.pos;
    let history = world
        .history(ship)
        .map(|h| h.cloned())
        .unwrap_or_default();
    history.push(Snapshot::at_rest(now, pos));

    let waypoints = waypoints
        .iter()
        .map(|wp| {
            let speed = if wp.speed > 0.0 { wp.speed } else { config.speed };
            RouteWaypoint::new(wp.pos, speed)
        })
        .collect();

    let id = world.new_entity();
    world.set_component(id, Transform { pos, vel: Vec2::ZERO });
    world.set_component(
        id,
        Movement {
            max_speed: config.speed,
        },
    );
    world.set_component(
        id,
        Missile {
            agro_radius: config.agro_radius,
            launch_time: now,
            lifetime: config.lifetime,
            target: None,
            return_index: None,
        },
    );
    world.set_component(id, Route { waypoints });
    world.set_component(id, RouteFollower::default());
    world.set_component(
        id,
        Owner {
            player_id: owner.to_owned(),
        },
    );
    world.set_component(id, history);
    world.set_component(id, Heat::new(config.heat));
    Some(id)
}

/// Uniform point in the central 60% of the world on each axis.
pub fn random_interior_point(bounds: &WorldBounds, rng: &mut ChaCha8Rng) -> Vec2 {
    Vec2::new(
        bounds.width * rng.gen_range(0.2..0.8),
        bounds.height * rng.gen_range(0.2..0.8),
    )
}
