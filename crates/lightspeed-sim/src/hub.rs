//! Hub and ticker.
//!
//! The hub owns every room. A single ticker thread advances all rooms in
//! sequence at `SIM_HZ`, holding each room's lock only for its own tick.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{info, warn};

use lightspeed_core::config::{ConfigError, RoomConfig};
use lightspeed_core::constants::SIM_HZ;
use lightspeed_core::heat::default_heat_params;

use crate::room::Room;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / SIM_HZ as u64);

#[derive(Debug, Error)]
pub enum HubError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to spawn ticker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Registry of rooms.
pub struct Hub {
    config: RoomConfig,
    rooms: Mutex<BTreeMap<String, Arc<Room>>>,
}

impl Hub {
    /// Create a hub whose rooms all use `config`.
    pub fn new(config: RoomConfig) -> Result<Self, HubError> {
        config.validate()?;
        for field in config.heat.rejected(default_heat_params()) {
            warn!(field, "heat override out of range, sanitised");
        }
        Ok(Self {
            config,
            rooms: Mutex::new(BTreeMap::new()),
        })
    }

    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    fn rooms(&self) -> MutexGuard<'_, BTreeMap<String, Arc<Room>>> {
        self.rooms.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get a room, creating it on first use.
    pub fn room(&self, id: &str) -> Arc<Room> {
        let mut rooms = self.rooms();
        Arc::clone(
            rooms
                .entry(id.to_owned())
                .or_insert_with(|| Arc::new(Room::new(id, &self.config))),
        )
    }

    pub fn find(&self, id: &str) -> Option<Arc<Room>> {
        self.rooms().get(id).cloned()
    }

    pub fn room_count(&self) -> usize {
        self.rooms().len()
    }

    /// Tick every room once. The registry lock is released before ticking.
    pub fn tick_all(&self) {
        let rooms: Vec<Arc<Room>> = self.rooms().values().cloned().collect();
        for room in rooms {
            room.tick();
        }
    }

    /// Drop rooms without human players. Returns how many were removed.
    pub fn remove_empty_rooms(&self) -> usize {
        let mut rooms = self.rooms();
        let before = rooms.len();
        rooms.retain(|id, room| {
            let keep = !room.is_empty();
            if !keep {
                info!(room = %id, "room closed");
            }
            keep
        });
        before - rooms.len()
    }
}

/// Background thread driving [`Hub::tick_all`].
pub struct Ticker {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn(hub: Arc<Hub>) -> Result<Self, HubError> {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = std::thread::Builder::new()
            .name("lightspeed-ticker".into())
            .spawn(move || run_ticker(&hub, &flag))?;
        info!(hz = SIM_HZ, "ticker started");
        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    /// Signal the thread and wait for it to finish its current tick.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("ticker thread panicked");
            }
            info!("ticker stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_ticker(hub: &Hub, stop: &AtomicBool) {
    let mut next_tick_time = Instant::now();

    while !stop.load(Ordering::Relaxed) {
        hub.tick_all();

        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind: reset instead of spiralling through catch-up ticks.
            warn!(behind = ?(now - next_tick_time), "ticker overrun");
            next_tick_time = now;
        }
    }
}
