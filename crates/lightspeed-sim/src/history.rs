//! Per-entity position history.
//!
//! A fixed-capacity ring of time-stamped samples with interpolated lookup.
//! The tick thread pushes while connection readers sample, so every buffer
//! carries its own `RwLock`.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use lightspeed_core::constants::HISTORY_CAPACITY;
use lightspeed_core::types::Snapshot;

#[derive(Debug, Clone)]
struct Ring {
    buf: Vec<Snapshot>,
    /// Slot the next push writes to.
    head: usize,
    len: usize,
}

impl Ring {
    fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Slot of the `i`-th newest sample (0 = newest).
    fn newest_slot(&self, i: usize) -> usize {
        let cap = self.capacity();
        (self.head + cap - 1 - i) % cap
    }

    fn oldest(&self) -> Option<Snapshot> {
        if self.len == 0 {
            return None;
        }
        Some(self.buf[self.newest_slot(self.len - 1)])
    }

    fn newest(&self) -> Option<Snapshot> {
        if self.len == 0 {
            return None;
        }
        Some(self.buf[self.newest_slot(0)])
    }
}

/// Bounded time-indexed history of one entity.
#[derive(Debug)]
pub struct History {
    ring: RwLock<Ring>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Empty history sized for `HISTORY_KEEP_S` at `SIM_HZ`.
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ring: RwLock::new(Ring {
                buf: vec![Snapshot::default(); capacity.max(1)],
                head: 0,
                len: 0,
            }),
        }
    }

    /// History holding a single sample.
    pub fn starting_at(snapshot: Snapshot) -> Self {
        let history = Self::new();
        history.push(snapshot);
        history
    }

    fn read(&self) -> RwLockReadGuard<'_, Ring> {
        self.ring.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Ring> {
        self.ring.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a sample, overwriting the oldest once full.
    pub fn push(&self, snapshot: Snapshot) {
        let mut ring = self.write();
        let cap = ring.capacity();
        let head = ring.head;
        ring.buf[head] = snapshot;
        ring.head = (head + 1) % cap;
        if ring.len < cap {
            ring.len += 1;
        }
    }

    /// Best-known state at time `t`.
    ///
    /// Before the oldest sample the oldest is returned unchanged, at or after
    /// the newest the newest is returned unchanged. In between, position and
    /// velocity are interpolated and the result is stamped `t`.
    pub fn get_at(&self, t: f64) -> Option<Snapshot> {
        let ring = self.read();
        if ring.len == 0 {
            return None;
        }

        let mut before = None;
        let mut after = None;
        for i in 0..ring.len {
            let s = ring.buf[ring.newest_slot(i)];
            if s.t >= t {
                after = Some(s);
            }
            if s.t <= t {
                before = Some(s);
                break;
            }
        }

        match (before, after) {
            (None, _) => ring.oldest(),
            (Some(_), None) => ring.newest(),
            (Some(a), Some(b)) => {
                if b.t == a.t {
                    return Some(a);
                }
                let alpha = (t - a.t) / (b.t - a.t);
                Some(Snapshot { t, ..a.lerp(&b, alpha) })
            }
        }
    }

    pub fn oldest(&self) -> Option<Snapshot> {
        self.read().oldest()
    }

    pub fn newest(&self) -> Option<Snapshot> {
        self.read().newest()
    }

    pub fn len(&self) -> usize {
        self.read().len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.read().capacity()
    }

    /// Independent deep copy.
    pub fn cloned(&self) -> History {
        History {
            ring: RwLock::new(self.read().clone()),
        }
    }
}
