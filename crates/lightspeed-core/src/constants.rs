//! Simulation constants and tuning parameters.

/// Propagation speed of every remote observation ("light speed"), map units/s.
pub const C: f64 = 600.0;

/// Simulation tick rate (Hz).
pub const SIM_HZ: u32 = 20;

/// Seconds per tick.
pub const DT: f64 = 1.0 / SIM_HZ as f64;

/// Rate at which connection readers extract room views (Hz).
pub const UPDATE_RATE_HZ: u32 = 10;

// --- World ---

/// Default world width in map units.
pub const WORLD_W: f64 = 8000.0;

/// Default world height in map units.
pub const WORLD_H: f64 = 4500.0;

/// Maximum players per room, bots included.
pub const ROOM_MAX_PLAYERS: usize = 2;

// --- History & perception ---

/// Seconds of position history retained per entity.
pub const HISTORY_KEEP_S: f64 = 30.0;

/// Extra ring slots beyond `HISTORY_KEEP_S * SIM_HZ`.
pub const HISTORY_CAPACITY_MARGIN: usize = 4;

/// Ring capacity of every entity history (604 at the default rates).
pub const HISTORY_CAPACITY: usize =
    (HISTORY_KEEP_S as usize) * (SIM_HZ as usize) + HISTORY_CAPACITY_MARGIN;

/// Upper bound on fixed-point iterations of the retarded-time solver.
pub const PERCEPTION_MAX_ITERATIONS: usize = 8;

/// Solver convergence tolerance: half a simulation tick.
pub const PERCEPTION_TOLERANCE: f64 = DT * 0.5;

/// How far past the emission time the oldest retained sample may lie before
/// the target counts as not yet visible.
pub const PERCEPTION_SAMPLE_SLACK: f64 = DT;

// --- Ships ---

/// Ship top speed (units/s).
pub const SHIP_MAX_SPEED: f64 = 250.0;

/// Distance at which a waypoint counts as reached.
pub const SHIP_STOP_EPS: f64 = 10.0;

/// Hit points of a freshly spawned ship.
pub const SHIP_MAX_HP: i32 = 3;

/// Speeds at or below this are treated as "stopped".
pub const MIN_MOVING_SPEED: f64 = 1e-3;

// --- Missiles ---

pub const MISSILE_MIN_SPEED: f64 = 40.0;
pub const MISSILE_MAX_SPEED: f64 = SHIP_MAX_SPEED;
pub const MISSILE_MIN_AGRO_RADIUS: f64 = 100.0;
pub const MISSILE_MAX_LIFETIME: f64 = 300.0;
pub const MISSILE_MIN_LIFETIME: f64 = 20.0;
pub const MISSILE_LIFETIME_SPEED_PENALTY: f64 = 80.0;
pub const MISSILE_LIFETIME_AGRO_PENALTY: f64 = 40.0;
pub const MISSILE_LIFETIME_AGRO_REF: f64 = 2000.0;

/// Perceived distance at which a missile detonates against a ship.
pub const MISSILE_HIT_RADIUS: f64 = 50.0;

/// Launch cooldown for a stationary ship (seconds).
pub const MISSILE_BASE_COOLDOWN: f64 = 2.0;

/// Cooldown growth factor with (ship speed / C)².
pub const MISSILE_COOLDOWN_SCALE: f64 = 8.0;

// --- Ship heat ---

pub const HEAT_MAX: f64 = 100.0;
pub const HEAT_WARN_AT: f64 = 70.0;
pub const HEAT_OVERHEAT_AT: f64 = 100.0;
pub const HEAT_STALL_SECONDS: f64 = 2.5;
/// Comfortable cruise, 60% of `SHIP_MAX_SPEED`.
pub const HEAT_MARKER_SPEED: f64 = 150.0;
pub const HEAT_EXP: f64 = 1.5;
pub const HEAT_K_UP: f64 = 22.0;
pub const HEAT_K_DOWN: f64 = 16.0;
pub const HEAT_MISSILE_SPIKE_CHANCE: f64 = 0.35;
pub const HEAT_MISSILE_SPIKE_MIN: f64 = 6.0;
pub const HEAT_MISSILE_SPIKE_MAX: f64 = 18.0;

// --- Missile heat ---
// Same physics as ships; missiles explode instead of stalling.

pub const MISSILE_HEAT_MAX: f64 = 50.0;
pub const MISSILE_HEAT_WARN_AT: f64 = 35.0;
pub const MISSILE_HEAT_OVERHEAT_AT: f64 = 50.0;
pub const MISSILE_HEAT_MARKER_SPEED: f64 = 120.0;
pub const MISSILE_HEAT_K_UP: f64 = 28.0;
pub const MISSILE_HEAT_K_DOWN: f64 = 12.0;
pub const MISSILE_HEAT_EXP: f64 = 1.5;

// --- Bots ---

/// Seconds between AI planning passes for a bot.
pub const AI_PLAN_INTERVAL: f64 = 0.2;

// --- Housekeeping ---

/// Destroyed entities are garbage-collected once per this many ticks.
pub const CLEANUP_INTERVAL_TICKS: u64 = SIM_HZ as u64;
