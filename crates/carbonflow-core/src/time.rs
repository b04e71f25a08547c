//! Logical time for deterministic execution
//!
//! The engine never reads a wall clock. The environment owns a
//! [`LogicalClock`] (block height equivalent) and stamps every call with the
//! current [`Tick`]. Ticks only move forward.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the logical clock.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Tick(pub u64);

impl Tick {
    /// Clock origin.
    pub const GENESIS: Tick = Tick(0);

    /// Get the raw value.
    pub fn value(self) -> u64 {
        self.0
    }

    /// Ticks elapsed since `earlier`, zero if `earlier` is in the future.
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// This tick advanced by `ticks`, saturating at the end of time.
    pub fn after(self, ticks: u64) -> Tick {
        Tick(self.0.saturating_add(ticks))
    }
}

impl From<u64> for Tick {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick-{}", self.0)
    }
}

/// Environment-owned monotonic clock.
#[derive(Debug, Clone, Default)]
pub struct LogicalClock {
    now: Tick,
}

impl LogicalClock {
    /// Clock starting at genesis.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current tick.
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Advance by `ticks` (mine `ticks` empty blocks) and return the new tick.
    pub fn advance(&mut self, ticks: u64) -> Tick {
        self.now = self.now.after(ticks);
        self.now
    }
}
