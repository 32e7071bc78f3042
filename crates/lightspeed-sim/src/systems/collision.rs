//! Missile/ship collisions.
//!
//! A missile hits the first enemy ship (ascending id) whose *perceived*
//! position lies within `MISSILE_HIT_RADIUS` of the missile. Ship
//! destruction is reported back to the room, which owns players and
//! respawning.

use rand_chacha::ChaCha8Rng;
use tracing::debug;

use lightspeed_core::constants::MISSILE_HIT_RADIUS;
use lightspeed_core::enums::MissileEnd;
use lightspeed_core::events::SimEvent;
use lightspeed_core::types::EntityId;

use crate::heat::apply_missile_heat_spike;
use crate::perception::perceived_distance;
use crate::store::{ComponentKey, World};

/// A ship brought to zero hit points this tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Kill {
    pub ship: EntityId,
    /// Owner of the destroyed ship.
    pub victim: String,
    /// Owner of the missile.
    pub attacker: String,
}

pub fn run(
    world: &mut World,
    now: f64,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<SimEvent>,
) -> Vec<Kill> {
    let ships = world.ids_with(&[
        ComponentKey::Transform,
        ComponentKey::Ship,
        ComponentKey::Owner,
    ]);
    let missiles = world.ids_with(&[
        ComponentKey::Transform,
        ComponentKey::Missile,
        ComponentKey::Owner,
    ]);
    let mut kills = Vec::new();

    for missile in missiles {
        if world.is_destroyed(missile) {
            continue;
        }
        let (Some(tr), Some(attacker)) = (world.transform(missile), world.owner(missile)) else {
            continue;
        };

        let hit = {
            let world: &World = world;
            ships.iter().copied().find(|&ship| {
                !world.is_destroyed(ship)
                    && world.owner(ship).is_some_and(|o| o != attacker)
                    && perceived_distance(tr.pos, ship, world, now) <= MISSILE_HIT_RADIUS
            })
        };
        let Some(ship) = hit else {
            continue;
        };

        let remaining_hp = match world.ship_mut(ship) {
            Some(mut s) => {
                s.hp -= 1;
                s.hp
            }
            None => continue,
        };
        if let Some(mut heat) = world.heat_mut(ship) {
            if apply_missile_heat_spike(&mut heat, now, rng) {
                debug!(ship = %ship, heat = heat.state.value, "heat spike");
            }
        }
        world.mark_destroyed(missile, now);

        debug!(missile = %missile, ship = %ship, remaining_hp, "missile hit");
        events.push(SimEvent::MissileHit {
            missile,
            ship,
            remaining_hp,
        });
        events.push(SimEvent::MissileEnded {
            missile,
            reason: MissileEnd::Impact,
        });

        if remaining_hp <= 0 {
            world.mark_destroyed(ship, now);
            let victim = world.owner(ship).unwrap_or_default();
            debug!(ship = %ship, victim = %victim, attacker = %attacker, "ship destroyed");
            events.push(SimEvent::ShipDestroyed {
                ship,
                owner: victim.clone(),
                attacker: attacker.clone(),
            });
            kills.push(Kill {
                ship,
                victim,
                attacker,
            });
        }
    }

    kills
}
