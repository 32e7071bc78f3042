//! Missile launch configuration, presets and derived timings.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::MissilePreset;
use crate::heat::{default_missile_heat_params, sanitize_heat_params, HeatParams};

/// Everything needed to launch a missile. Always pass through
/// [`sanitize_missile_config`] before use; `lifetime` is derived there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MissileConfig {
    pub speed: f64,
    pub agro_radius: f64,
    pub lifetime: f64,
    pub heat: HeatParams,
}

impl Default for MissileConfig {
    fn default() -> Self {
        preset_config(MissilePreset::default())
    }
}

/// Clamp speed and agro radius into their legal ranges, derive the lifetime,
/// and sanitise (or default) the heat parameters.
pub fn sanitize_missile_config(cfg: MissileConfig) -> MissileConfig {
    let speed = if cfg.speed.is_nan() {
        MISSILE_MIN_SPEED
    } else {
        cfg.speed.clamp(MISSILE_MIN_SPEED, MISSILE_MAX_SPEED)
    };
    let agro_radius = if cfg.agro_radius >= MISSILE_MIN_AGRO_RADIUS {
        cfg.agro_radius
    } else {
        MISSILE_MIN_AGRO_RADIUS
    };
    let heat = if cfg.heat.max > 0.0 {
        sanitize_heat_params(cfg.heat)
    } else {
        default_missile_heat_params()
    };

    MissileConfig {
        speed,
        agro_radius,
        lifetime: missile_lifetime_for(speed, agro_radius),
        heat,
    }
}

/// Faster missiles and wider seekers burn out sooner.
pub fn missile_lifetime_for(speed: f64, agro_radius: f64) -> f64 {
    let span = MISSILE_MAX_SPEED - MISSILE_MIN_SPEED;
    let speed_norm = if span > 0.0 {
        ((speed - MISSILE_MIN_SPEED) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let effective_agro = (agro_radius - MISSILE_MIN_AGRO_RADIUS).max(0.0);
    let agro_norm = (effective_agro / MISSILE_LIFETIME_AGRO_REF).clamp(0.0, 1.0);
    let reduction =
        speed_norm * MISSILE_LIFETIME_SPEED_PENALTY + agro_norm * MISSILE_LIFETIME_AGRO_PENALTY;
    (MISSILE_MAX_LIFETIME - reduction).clamp(MISSILE_MIN_LIFETIME, MISSILE_MAX_LIFETIME)
}

/// Launch cooldown grows with the square of the launching ship's speed
/// relative to `C`.
pub fn missile_cooldown_for_speed(speed: f64) -> f64 {
    if MISSILE_BASE_COOLDOWN <= 0.0 {
        return 0.0;
    }
    if C <= 0.0 {
        return MISSILE_BASE_COOLDOWN;
    }
    let beta = (speed / C).clamp(0.0, 1.0);
    MISSILE_BASE_COOLDOWN * (1.0 + MISSILE_COOLDOWN_SCALE * beta * beta)
}

/// Sanitised configuration for a built-in preset.
pub fn preset_config(preset: MissilePreset) -> MissileConfig {
    let raw = match preset {
        MissilePreset::Scout => MissileConfig {
            speed: 80.0,
            agro_radius: 1500.0,
            lifetime: 0.0,
            heat: HeatParams {
                max: 60.0,
                warn_at: 42.0,
                overheat_at: 60.0,
                stall_seconds: 0.0,
                marker_speed: 70.0,
                exp: 1.5,
                k_up: 20.0,
                k_down: 15.0,
                missile_spike_chance: 0.0,
                missile_spike_min: 0.0,
                missile_spike_max: 0.0,
            },
        },
        MissilePreset::Hunter => MissileConfig {
            speed: 150.0,
            agro_radius: 800.0,
            lifetime: 0.0,
            heat: default_missile_heat_params(),
        },
        MissilePreset::Sniper => MissileConfig {
            speed: 220.0,
            agro_radius: 300.0,
            lifetime: 0.0,
            heat: HeatParams {
                max: 40.0,
                warn_at: 28.0,
                overheat_at: 40.0,
                stall_seconds: 0.0,
                marker_speed: 180.0,
                exp: 1.5,
                k_up: 35.0,
                k_down: 8.0,
                missile_spike_chance: 0.0,
                missile_spike_min: 0.0,
                missile_spike_max: 0.0,
            },
        },
    };
    sanitize_missile_config(raw)
}
