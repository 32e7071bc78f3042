//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Built-in missile loadouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissilePreset {
    /// Slow, long detection range, large heat capacity.
    Scout,
    /// Balanced speed and detection.
    #[default]
    Hunter,
    /// Fast, narrow detection, small heat capacity.
    Sniper,
}

/// Why a missile stopped flying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissileEnd {
    /// Lifetime ran out.
    Expired,
    /// Heat reached the overheat threshold.
    Overheated,
    /// Detonated against a ship.
    Impact,
}
