//! Retarded-time perception.
//!
//! An observer at `now` sees a target as it was when the light now arriving
//! left it. The emission time solves `t = now - |observer - pos(t)| / C`,
//! where `pos(t)` is the piecewise-linear history, so it is found by
//! fixed-point iteration. Every lookup fails closed: no sample old enough,
//! a destroyed target, or missing components all mean "not visible".

use lightspeed_core::constants::*;
use lightspeed_core::types::{EntityId, Snapshot, Vec2};

use crate::store::World;

/// Converged emission time of one observer/target solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionTime {
    pub t: f64,
    pub iterations: usize,
}

/// Solve for the emission time without the visibility checks.
pub fn retarded_time(
    observer: Vec2,
    target: EntityId,
    world: &World,
    now: f64,
) -> Option<EmissionTime> {
    let current = world.transform(target)?.pos;
    let history = world.history(target)?;

    let window = |t: f64| t.clamp(now - HISTORY_KEEP_S, now);
    let mut t = window(now - observer.distance(current) / C);
    let mut iterations = 0;

    while iterations < PERCEPTION_MAX_ITERATIONS {
        iterations += 1;
        let snap = history.get_at(t)?;
        let next = window(now - observer.distance(snap.pos) / C);
        let delta = (next - t).abs();
        t = next;
        if delta <= PERCEPTION_TOLERANCE {
            break;
        }
    }

    Some(EmissionTime { t, iterations })
}

/// What an observer at `observer` perceives of `target` at `now`.
pub fn perceive_entity(
    observer: Vec2,
    target: EntityId,
    world: &World,
    now: f64,
) -> Option<Snapshot> {
    let emission = retarded_time(observer, target, world, now)?;

    if let Some(destroyed) = world.destroyed(target) {
        if destroyed.at < emission.t {
            return None;
        }
    }

    let history = world.history(target)?;
    let oldest = history.oldest()?;
    if oldest.t > emission.t + PERCEPTION_SAMPLE_SLACK {
        return None;
    }
    history.get_at(emission.t)
}

/// Distance to the perceived position, `f64::INFINITY` when not visible.
pub fn perceived_distance(observer: Vec2, target: EntityId, world: &World, now: f64) -> f64 {
    perceive_entity(observer, target, world, now)
        .map(|snap| observer.distance(snap.pos))
        .unwrap_or(f64::INFINITY)
}
