//! Per-identity rate windows
//!
//! A window opens at `window_start` and lasts `window_len` ticks. Once the
//! window has elapsed the next gated action reopens it at the current tick
//! with a zero count. Within a window an identity may perform at most
//! `max_actions` gated actions.

use carbonflow_core::{safe_increment, CarbonError, CarbonResult, Identity, Tick};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Action counter for one identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RateWindow {
    /// Tick the current window opened at
    pub window_start: Tick,
    /// Gated actions taken in the current window
    pub action_count: u64,
}

impl RateWindow {
    /// The window as seen at `now`: reopened if `window_len` ticks have elapsed.
    pub fn rolled(self, now: Tick, window_len: u64) -> Self {
        if now.since(self.window_start) >= window_len {
            Self {
                window_start: now,
                action_count: 0,
            }
        } else {
            self
        }
    }

    /// Whether one more action fits in the window.
    pub fn has_headroom(&self, max_actions: u32) -> bool {
        self.action_count < u64::from(max_actions)
    }

    /// Charge one action at `now`, returning the updated window.
    pub fn charge(self, now: Tick, window_len: u64, max_actions: u32) -> CarbonResult<Self> {
        let mut window = self.rolled(now, window_len);
        if !window.has_headroom(max_actions) {
            return Err(CarbonError::RateLimited);
        }
        window.action_count = safe_increment(window.action_count)?;
        Ok(window)
    }
}

/// Rate windows for every identity that has taken a gated action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimiter {
    window_len: u64,
    max_actions: u32,
    windows: BTreeMap<Identity, RateWindow>,
}

impl RateLimiter {
    pub fn new(window_len: u64, max_actions: u32) -> Self {
        Self {
            window_len,
            max_actions,
            windows: BTreeMap::new(),
        }
    }

    /// Stored window for `who` (default for identities never seen).
    pub fn window(&self, who: &Identity) -> RateWindow {
        self.windows.get(who).copied().unwrap_or_default()
    }

    /// Compute the window `who` would have after one more action, without storing it.
    pub fn check(&self, who: &Identity, now: Tick) -> CarbonResult<RateWindow> {
        self.window(who)
            .charge(now, self.window_len, self.max_actions)
    }

    /// Store a window produced by [`RateLimiter::check`].
    pub fn record(&mut self, who: Identity, window: RateWindow) {
        self.windows.insert(who, window);
    }

    /// Actions `who` could still take at `now`.
    pub fn remaining(&self, who: &Identity, now: Tick) -> u64 {
        let window = self.window(who).rolled(now, self.window_len);
        u64::from(self.max_actions).saturating_sub(window.action_count)
    }
}
