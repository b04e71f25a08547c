//! Per-call context supplied by the transaction layer.

use crate::identifiers::Identity;
use crate::time::{LogicalClock, Tick};
use serde::{Deserialize, Serialize};

/// Authenticated caller plus the tick the call executes at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    /// Principal that signed the call
    pub caller: Identity,
    /// Logical time of execution
    pub now: Tick,
}

impl CallContext {
    /// Create a context for `caller` at `now`.
    pub fn new(caller: impl Into<Identity>, now: Tick) -> Self {
        Self {
            caller: caller.into(),
            now,
        }
    }
}

impl LogicalClock {
    /// Stamp a call from `caller` with the current tick.
    pub fn context_for(&self, caller: impl Into<Identity>) -> CallContext {
        CallContext::new(caller, self.now())
    }
}
