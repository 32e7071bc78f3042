//! Snapshot system: builds the [`RoomView`] one player is allowed to see.
//!
//! Read-only. The viewer's own ship is reported as it truly is; every other
//! ship and every missile is reported as perceived from the viewer's ship.

use lightspeed_core::state::*;
use lightspeed_core::types::{EntityId, Vec2};

use crate::perception::perceive_entity;
use crate::room::RoomState;
use crate::store::{ComponentKey, World};

pub fn build_room_view(state: &RoomState, player_id: &str) -> Option<RoomView> {
    let player = state.player(player_id)?;
    let world = state.world();
    let now = state.now();
    let bounds = state.bounds();

    let own_ship = player
        .ship
        .filter(|&ship| world.exists(ship) && !world.is_destroyed(ship));
    let me = own_ship.and_then(|ship| build_own_ship(state, ship, player.kills));
    let observer = me.as_ref().map(|view| view.pos);

    let (ghosts, missiles) = match observer {
        Some(pos) => (
            build_ghosts(state, pos, own_ship),
            build_missiles(world, pos, player_id, now),
        ),
        None => (Vec::new(), Vec::new()),
    };

    Some(RoomView {
        now,
        world_width: bounds.width,
        world_height: bounds.height,
        me,
        ghosts,
        missiles,
        missile_cooldown_remaining: (player.missile_ready_at - now).max(0.0),
        missile_routes: player.missile_routes.routes().to_vec(),
        active_missile_route: player.missile_routes.active_id().to_owned(),
    })
}

fn build_own_ship(state: &RoomState, ship: EntityId, kills: u32) -> Option<ShipView> {
    let world = state.world();
    let tr = world.transform(ship)?;
    let (waypoints, route_index) = match (world.route(ship), world.route_follower(ship)) {
        (Some(route), Some(follower)) => (route.waypoints.clone(), follower.index),
        _ => (Vec::new(), 0),
    };

    Some(ShipView {
        entity: ship,
        owner: world.owner(ship).unwrap_or_default(),
        pos: tr.pos,
        vel: tr.vel,
        t: state.now(),
        hp: world.ship(ship).map(|s| s.hp).unwrap_or_default(),
        kills,
        is_self: true,
        heat: world.heat(ship).map(|h| HeatView {
            params: h.params,
            state: h.state,
        }),
        waypoints,
        route_index,
    })
}

fn build_ghosts(state: &RoomState, observer: Vec2, own_ship: Option<EntityId>) -> Vec<ShipView> {
    let world = state.world();
    let now = state.now();
    let mut ghosts = Vec::new();

    world.for_each(
        &[ComponentKey::Transform, ComponentKey::Ship, ComponentKey::Owner],
        |id| {
            if Some(id) == own_ship {
                return;
            }
            let Some(snap) = perceive_entity(observer, id, world, now) else {
                return;
            };
            let owner = world.owner(id).unwrap_or_default();
            let kills = state.player(&owner).map(|p| p.kills).unwrap_or_default();
            ghosts.push(ShipView {
                entity: id,
                owner,
                pos: snap.pos,
                vel: snap.vel,
                t: snap.t,
                hp: world.ship(id).map(|s| s.hp).unwrap_or_default(),
                kills,
                is_self: false,
                heat: None,
                waypoints: Vec::new(),
                route_index: 0,
            });
        },
    );

    ghosts
}

fn build_missiles(world: &World, observer: Vec2, player_id: &str, now: f64) -> Vec<MissileView> {
    let mut missiles = Vec::new();

    world.for_each(
        &[
            ComponentKey::Transform,
            ComponentKey::Missile,
            ComponentKey::Owner,
        ],
        |id| {
            let Some(missile) = world.missile(id) else {
                return;
            };
            let Some(snap) = perceive_entity(observer, id, world, now) else {
                return;
            };
            let owner = world.owner(id).unwrap_or_default();
            let is_self = owner == player_id;
            missiles.push(MissileView {
                entity: id,
                owner,
                is_self,
                pos: snap.pos,
                vel: snap.vel,
                t: snap.t,
                agro_radius: missile.agro_radius,
                launch_time: missile.launch_time,
                expires_at: missile.expires_at(),
                target: missile.target.filter(|_| is_self),
                heat: world.heat(id).filter(|_| is_self).map(|h| HeatView {
                    params: h.params,
                    state: h.state,
                }),
            });
        },
    );

    missiles
}
