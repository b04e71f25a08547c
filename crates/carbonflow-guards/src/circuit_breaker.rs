//! Insurance circuit breaker.
//!
//! Advisory alert flag: raised when the aggregate insurance pool exceeds the
//! threshold, cleared only by an explicit admin reset. It never blocks
//! operations by itself.

use carbonflow_core::Amount;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitBreaker {
    threshold: Amount,
    active: bool,
}

impl CircuitBreaker {
    pub fn new(threshold: Amount) -> Self {
        Self {
            threshold,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn threshold(&self) -> Amount {
        self.threshold
    }

    /// Raise the flag if `total_pool` is strictly above the threshold.
    ///
    /// An active flag stays raised even when the total is below threshold.
    /// Returns whether this evaluation tripped a previously clear breaker.
    pub fn evaluate(&mut self, total_pool: Amount) -> bool {
        let tripped = !self.active && total_pool > self.threshold;
        if total_pool > self.threshold {
            self.active = true;
        }
        tripped
    }

    pub fn reset(&mut self) {
        self.active = false;
    }
}
