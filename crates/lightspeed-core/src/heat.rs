//! Heat model parameters.
//!
//! Heat rises while flying above `marker_speed` and dissipates below it.
//! The integration itself lives with the simulation systems; this module
//! only owns the parameter vocabulary and its sanitisation.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Tuning of a heat model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatParams {
    /// Heat capacity; the value is clamped to `[0, max]`.
    pub max: f64,
    /// UI warning threshold.
    pub warn_at: f64,
    /// Threshold that triggers a stall (ships) or an explosion (missiles).
    pub overheat_at: f64,
    pub stall_seconds: f64,
    /// Speed at which heat neither rises nor falls.
    pub marker_speed: f64,
    /// Response exponent.
    pub exp: f64,
    pub k_up: f64,
    pub k_down: f64,
    /// Probability (0..1) of a heat spike when hit by a missile.
    pub missile_spike_chance: f64,
    pub missile_spike_min: f64,
    pub missile_spike_max: f64,
}

/// Mutable heat state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HeatState {
    pub value: f64,
    /// Game time when the current stall ends; 0 when never stalled.
    pub stall_until: f64,
}

fn ship_defaults() -> HeatParams {
    HeatParams {
        max: HEAT_MAX,
        warn_at: HEAT_WARN_AT,
        overheat_at: HEAT_OVERHEAT_AT,
        stall_seconds: HEAT_STALL_SECONDS,
        marker_speed: HEAT_MARKER_SPEED,
        exp: HEAT_EXP,
        k_up: HEAT_K_UP,
        k_down: HEAT_K_DOWN,
        missile_spike_chance: HEAT_MISSILE_SPIKE_CHANCE,
        missile_spike_min: HEAT_MISSILE_SPIKE_MIN,
        missile_spike_max: HEAT_MISSILE_SPIKE_MAX,
    }
}

/// Replace out-of-range or NaN parameters with safe values.
///
/// Thresholds are kept ordered (`warn_at <= overheat_at <= max`) and the
/// spike range is kept non-empty.
pub fn sanitize_heat_params(mut p: HeatParams) -> HeatParams {
    let defaults = ship_defaults();

    if !(p.max > 0.0) {
        p.max = defaults.max;
    }
    if !(p.warn_at > 0.0 && p.warn_at <= p.max) {
        p.warn_at = defaults.warn_at;
    }
    if !(p.overheat_at > 0.0 && p.overheat_at <= p.max && p.overheat_at >= p.warn_at) {
        p.overheat_at = p.warn_at.max(defaults.overheat_at).min(p.max);
    }
    if !(p.stall_seconds >= 0.0) {
        p.stall_seconds = defaults.stall_seconds;
    }
    if !(p.marker_speed > 0.0) {
        p.marker_speed = defaults.marker_speed;
    }
    if !(p.exp > 0.0) {
        p.exp = defaults.exp;
    }
    if !(p.k_up >= 0.0) {
        p.k_up = defaults.k_up;
    }
    if !(p.k_down >= 0.0) {
        p.k_down = defaults.k_down;
    }
    p.missile_spike_chance = if p.missile_spike_chance.is_nan() {
        0.0
    } else {
        p.missile_spike_chance.clamp(0.0, 1.0)
    };
    if !(p.missile_spike_min >= 0.0) {
        p.missile_spike_min = defaults.missile_spike_min;
    }
    if !(p.missile_spike_max >= p.missile_spike_min) {
        p.missile_spike_max = p.missile_spike_min.max(defaults.missile_spike_max);
    }
    p
}

/// Default ship heat parameters.
pub fn default_heat_params() -> HeatParams {
    sanitize_heat_params(ship_defaults())
}

/// Default missile heat parameters: lower capacity, faster heating, slower
/// cooling, lower marker speed, no stall and no hit spikes.
pub fn default_missile_heat_params() -> HeatParams {
    sanitize_heat_params(HeatParams {
        max: MISSILE_HEAT_MAX,
        warn_at: MISSILE_HEAT_WARN_AT,
        overheat_at: MISSILE_HEAT_OVERHEAT_AT,
        stall_seconds: 0.0,
        marker_speed: MISSILE_HEAT_MARKER_SPEED,
        exp: MISSILE_HEAT_EXP,
        k_up: MISSILE_HEAT_K_UP,
        k_down: MISSILE_HEAT_K_DOWN,
        missile_spike_chance: 0.0,
        missile_spike_min: 0.0,
        missile_spike_max: 0.0,
    })
}

impl Default for HeatParams {
    fn default() -> Self {
        default_heat_params()
    }
}
