//! Events emitted by the simulation for the transport layer (sound cues,
//! kill feed, HUD flashes). Drained once per broadcast.

use serde::{Deserialize, Serialize};

use crate::enums::MissileEnd;
use crate::types::EntityId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    MissileLaunched {
        missile: EntityId,
        owner: String,
    },
    /// A missile locked onto a perceived ship.
    TargetAcquired {
        missile: EntityId,
        target: EntityId,
    },
    /// The target left perception or agro range.
    TargetLost {
        missile: EntityId,
        target: EntityId,
    },
    MissileHit {
        missile: EntityId,
        ship: EntityId,
        remaining_hp: i32,
    },
    ShipDestroyed {
        ship: EntityId,
        owner: String,
        attacker: String,
    },
    MissileEnded {
        missile: EntityId,
        reason: MissileEnd,
    },
    /// A ship crossed its overheat threshold and stalled.
    ShipStalled {
        ship: EntityId,
        until: f64,
    },
}
