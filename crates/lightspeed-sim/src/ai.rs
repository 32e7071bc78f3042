//! Bot controller boundary.
//!
//! Decision logic lives outside this crate. A bot is any [`AiBehavior`]; the
//! room polls it every `AI_PLAN_INTERVAL` seconds with an [`AiContext`] and
//! applies the returned commands for the bot's player. Opponents and
//! threats in the context are *perceived* from the bot's ship, so bots play
//! under the same light delay as humans.

use lightspeed_core::commands::AiCommand;
use lightspeed_core::components::{Heat, RouteWaypoint, Transform};
use lightspeed_core::types::{EntityId, Snapshot, WorldBounds};

use crate::perception::perceive_entity;
use crate::store::{ComponentKey, World};

/// Produces commands for one bot.
pub trait AiBehavior: Send {
    fn plan(&mut self, ctx: &AiContext) -> Vec<AiCommand>;
}

/// A perceived remote entity.
#[derive(Debug, Clone)]
pub struct Contact {
    pub entity: EntityId,
    pub owner: String,
    pub snapshot: Snapshot,
    /// Distance from the bot's ship to the perceived position.
    pub distance: f64,
}

/// Everything a behavior may look at when planning.
#[derive(Debug, Clone)]
pub struct AiContext {
    pub now: f64,
    pub player_id: String,
    pub ship: EntityId,
    pub transform: Transform,
    pub heat: Option<Heat>,
    pub waypoints: Vec<RouteWaypoint>,
    pub route_index: usize,
    pub missile_ready: bool,
    pub bounds: WorldBounds,
    /// Enemy ships, ascending id.
    pub opponents: Vec<Contact>,
    /// Enemy missiles, ascending id.
    pub threats: Vec<Contact>,
}

/// Bot registration inside a room.
pub struct BotAgent {
    pub behavior: Box<dyn AiBehavior>,
    pub next_plan_at: f64,
}

impl BotAgent {
    pub fn new(behavior: Box<dyn AiBehavior>) -> Self {
        Self {
            behavior,
            next_plan_at: 0.0,
        }
    }

    pub fn ready(&self, now: f64) -> bool {
        now >= self.next_plan_at
    }
}

fn perceived_contacts(
    world: &World,
    keys: &[ComponentKey],
    observer: &Transform,
    player_id: &str,
    now: f64,
) -> Vec<Contact> {
    let mut contacts = Vec::new();
    world.for_each(keys, |id| {
        if world.is_destroyed(id) {
            return;
        }
        let Some(owner) = world.owner(id) else {
            return;
        };
        if owner == player_id {
            return;
        }
        if let Some(snapshot) = perceive_entity(observer.pos, id, world, now) {
            contacts.push(Contact {
                entity: id,
                owner,
                distance: observer.pos.distance(snapshot.pos),
                snapshot,
            });
        }
    });
    contacts
}

/// Build the planning context for `player_id` flying `ship`. Returns `None`
/// when the ship has no position.
pub fn build_ai_context(
    world: &World,
    now: f64,
    bounds: WorldBounds,
    player_id: &str,
    ship: EntityId,
    missile_ready: bool,
) -> Option<AiContext> {
    let transform = world.transform(ship)?;
    let (waypoints, route_index) = match (world.route(ship), world.route_follower(ship)) {
        (Some(route), Some(follower)) => (route.waypoints.clone(), follower.index),
        _ => (Vec::new(), 0),
    };

    Some(AiContext {
        now,
        player_id: player_id.to_owned(),
        ship,
        transform,
        heat: world.heat(ship),
        waypoints,
        route_index,
        missile_ready,
        bounds,
        opponents: perceived_contacts(
            world,
            &[ComponentKey::Transform, ComponentKey::Ship, ComponentKey::Owner],
            &transform,
            player_id,
            now,
        ),
        threats: perceived_contacts(
            world,
            &[
                ComponentKey::Transform,
                ComponentKey::Missile,
                ComponentKey::Owner,
            ],
            &transform,
            player_id,
            now,
        ),
    })
}
