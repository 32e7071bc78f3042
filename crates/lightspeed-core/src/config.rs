//! Room configuration.
//!
//! Loaded from JSON by the embedding server. Heat entries are partial
//! overrides merged onto the defaults and then sanitised, so a config file
//! only needs to name the values it changes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{WORLD_H, WORLD_W};
use crate::heat::{default_heat_params, sanitize_heat_params, HeatParams};
use crate::types::WorldBounds;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse room config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("world size must be positive, got {width} x {height}")]
    WorldSize { width: f64, height: f64 },
}

/// Optional per-field heat overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeatOverrides {
    pub max: Option<f64>,
    pub warn_at: Option<f64>,
    pub overheat_at: Option<f64>,
    pub stall_seconds: Option<f64>,
    pub marker_speed: Option<f64>,
    pub exp: Option<f64>,
    pub k_up: Option<f64>,
    pub k_down: Option<f64>,
    pub missile_spike_chance: Option<f64>,
    pub missile_spike_min: Option<f64>,
    pub missile_spike_max: Option<f64>,
}

impl HeatOverrides {
    /// Merge onto `base` and sanitise the result.
    pub fn apply(&self, mut base: HeatParams) -> HeatParams {
        let fields: [(&mut f64, Option<f64>); 11] = [
            (&mut base.max, self.max),
            (&mut base.warn_at, self.warn_at),
            (&mut base.overheat_at, self.overheat_at),
            (&mut base.stall_seconds, self.stall_seconds),
            (&mut base.marker_speed, self.marker_speed),
            (&mut base.exp, self.exp),
            (&mut base.k_up, self.k_up),
            (&mut base.k_down, self.k_down),
            (&mut base.missile_spike_chance, self.missile_spike_chance),
            (&mut base.missile_spike_min, self.missile_spike_min),
            (&mut base.missile_spike_max, self.missile_spike_max),
        ];
        for (slot, value) in fields {
            if let Some(v) = value {
                *slot = v;
            }
        }
        sanitize_heat_params(base)
    }

    /// Names of the overrides that sanitisation replaced when merged onto
    /// `base`.
    pub fn rejected(&self, base: HeatParams) -> Vec<&'static str> {
        let p = self.apply(base);
        let fields = [
            ("max", self.max, p.max),
            ("warnAt", self.warn_at, p.warn_at),
            ("overheatAt", self.overheat_at, p.overheat_at),
            ("stallSeconds", self.stall_seconds, p.stall_seconds),
            ("markerSpeed", self.marker_speed, p.marker_speed),
            ("exp", self.exp, p.exp),
            ("kUp", self.k_up, p.k_up),
            ("kDown", self.k_down, p.k_down),
            ("missileSpikeChance", self.missile_spike_chance, p.missile_spike_chance),
            ("missileSpikeMin", self.missile_spike_min, p.missile_spike_min),
            ("missileSpikeMax", self.missile_spike_max, p.missile_spike_max),
        ];
        fields
            .into_iter()
            .filter(|&(_, requested, used)| requested.is_some_and(|v| v != used))
            .map(|(name, _, _)| name)
            .collect()
    }
}

/// Configuration for every room created by a hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoomConfig {
    /// RNG seed. Same seed and same commands = same simulation.
    pub seed: u64,
    pub world_width: f64,
    pub world_height: f64,
    pub heat: HeatOverrides,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            world_width: WORLD_W,
            world_height: WORLD_H,
            heat: HeatOverrides::default(),
        }
    }
}

impl RoomConfig {
    /// Parse and validate a JSON document. Missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let cfg: RoomConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.world_width > 0.0 && self.world_height > 0.0) {
            return Err(ConfigError::WorldSize {
                width: self.world_width,
                height: self.world_height,
            });
        }
        Ok(())
    }

    /// Ship heat parameters after applying the overrides.
    pub fn ship_heat(&self) -> HeatParams {
        self.heat.apply(default_heat_params())
    }

    pub fn bounds(&self) -> WorldBounds {
        WorldBounds {
            width: self.world_width,
            height: self.world_height,
        }
    }
}
