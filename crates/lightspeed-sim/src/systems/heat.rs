//! Heat system: integrates heat for every live entity carrying a heat
//! model. Ships stall on overheat, missiles explode.

use tracing::debug;

use lightspeed_core::enums::MissileEnd;
use lightspeed_core::events::SimEvent;

use crate::heat::update_heat;
use crate::store::{ComponentKey, World};

pub fn run(world: &mut World, now: f64, dt: f64, events: &mut Vec<SimEvent>) {
    for id in world.ids_with(&[ComponentKey::Transform, ComponentKey::Heat]) {
        if world.is_destroyed(id) {
            continue;
        }
        let Some(speed) = world.transform(id).map(|t| t.vel.length()) else {
            continue;
        };
        let is_missile = world.has_key(id, ComponentKey::Missile);

        let (overheated, value, overheat_at, stall_until) = {
            let Some(mut heat) = world.heat_mut(id) else {
                continue;
            };
            let overheated = update_heat(&mut heat, speed, dt, now);
            (
                overheated,
                heat.state.value,
                heat.params.overheat_at,
                heat.state.stall_until,
            )
        };

        if is_missile {
            if value >= overheat_at {
                world.mark_destroyed(id, now);
                debug!(missile = %id, heat = value, "missile overheated");
                events.push(SimEvent::MissileEnded {
                    missile: id,
                    reason: MissileEnd::Overheated,
                });
            }
        } else if overheated {
            debug!(ship = %id, until = stall_until, "ship stalled");
            events.push(SimEvent::ShipStalled {
                ship: id,
                until: stall_until,
            });
        }
    }
}
