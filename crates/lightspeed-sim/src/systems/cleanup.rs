//! Cleanup system: removes entities destroyed longer ago than the history
//! retention window. Until then they stay addressable so observers can
//! still perceive their final moments.

use lightspeed_core::constants::HISTORY_KEEP_S;
use lightspeed_core::types::EntityId;

use crate::store::{ComponentKey, World};

/// Remove expired entities. Uses a caller-owned buffer to avoid per-call
/// allocation and returns the number removed.
pub fn run(world: &mut World, now: f64, despawn_buffer: &mut Vec<EntityId>) -> usize {
    despawn_buffer.clear();

    world.for_each(&[ComponentKey::Destroyed], |id| {
        if let Some(destroyed) = world.destroyed(id) {
            if now - destroyed.at > HISTORY_KEEP_S {
                despawn_buffer.push(id);
            }
        }
    });

    let removed = despawn_buffer.len();
    for id in despawn_buffer.drain(..) {
        world.remove_entity(id);
    }
    removed
}
