//! Heat integration.
//!
//! Heat follows a marker-relative power law: it rises while flying faster
//! than `marker_speed` and bleeds off below it. Reaching `overheat_at`
//! starts a stall, which never extends while already running.

use rand::Rng;

use lightspeed_core::components::{Heat, RouteWaypoint};
use lightspeed_core::heat::HeatParams;
use lightspeed_core::types::Vec2;

/// Heat change per second at `speed`.
fn heat_rate(params: &HeatParams, speed: f64) -> f64 {
    let marker = params.marker_speed.max(1e-6);
    let dev = speed - params.marker_speed;
    if dev >= 0.0 {
        params.k_up * (dev / marker).powf(params.exp)
    } else {
        -params.k_down * (dev.abs() / marker).powf(params.exp)
    }
}

/// Start a stall if at the overheat threshold and not already stalled.
/// Returns true when a stall was started.
fn check_overheat(heat: &mut Heat, now: f64) -> bool {
    if heat.state.value >= heat.params.overheat_at && now >= heat.state.stall_until {
        heat.state.stall_until = now + heat.params.stall_seconds;
        return true;
    }
    false
}

/// Integrate one step at `speed`. Returns true when the step overheated.
pub fn update_heat(heat: &mut Heat, speed: f64, dt: f64, now: f64) -> bool {
    let rate = heat_rate(&heat.params, speed);
    heat.state.value = (heat.state.value + rate * dt).clamp(0.0, heat.params.max);
    check_overheat(heat, now)
}

/// Roll for a heat spike after a missile hit. Returns true when one was
/// applied.
pub fn apply_missile_heat_spike(heat: &mut Heat, now: f64, rng: &mut impl Rng) -> bool {
    let p = heat.params;
    if p.missile_spike_chance <= 0.0 || p.missile_spike_max <= 0.0 {
        return false;
    }
    if rng.gen::<f64>() >= p.missile_spike_chance {
        return false;
    }

    let span = (p.missile_spike_max - p.missile_spike_min).max(0.0);
    let mut spike = p.missile_spike_min;
    if span > 0.0 {
        spike += rng.gen::<f64>() * span;
    }
    heat.state.value = (heat.state.value + spike).min(p.max);
    check_overheat(heat, now);
    true
}

/// Predicted heat at the start and at each waypoint of a planned route.
///
/// Each leg is flown at the mean of the entry and waypoint speeds. The
/// returned vector has `waypoints.len() + 1` entries.
pub fn project_heat_for_route(
    current: f64,
    params: &HeatParams,
    pos: Vec2,
    speed: f64,
    waypoints: &[RouteWaypoint],
) -> Vec<f64> {
    let mut projected = Vec::with_capacity(waypoints.len() + 1);
    projected.push(current);

    let mut heat = current;
    let mut pos = pos;
    let mut speed = speed;

    for wp in waypoints {
        let distance = pos.distance(wp.pos);
        if distance < 1e-6 {
            projected.push(heat);
            continue;
        }

        let avg_speed = (speed + wp.speed) * 0.5;
        let leg_time = distance / avg_speed.max(1.0);
        heat = (heat + heat_rate(params, avg_speed) * leg_time).clamp(0.0, params.max);
        projected.push(heat);

        pos = wp.pos;
        speed = wp.speed;
    }

    projected
}
