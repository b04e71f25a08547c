//! Timelocked admin succession: `Idle -> Pending -> Idle`.

use carbonflow_core::{CarbonError, CarbonResult, Identity, Tick};
use serde::{Deserialize, Serialize};

/// An initiated, not yet completed, admin transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransfer {
    pub target: Identity,
    pub initiated_at: Tick,
}

impl PendingTransfer {
    /// First tick at which the target may complete the transfer.
    pub fn unlocks_at(&self, timelock: u64) -> Tick {
        self.initiated_at.after(timelock)
    }
}

/// Admin succession state machine.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AdminSuccession {
    #[default]
    Idle,
    Pending(PendingTransfer),
}

impl AdminSuccession {
    /// Pending transfer, if any.
    pub fn pending(&self) -> Option<&PendingTransfer> {
        match self {
            AdminSuccession::Idle => None,
            AdminSuccession::Pending(pending) => Some(pending),
        }
    }

    /// Start (or restart) a transfer to `target`. Any earlier pending transfer is dropped.
    pub fn initiate(&mut self, target: Identity, now: Tick) {
        *self = AdminSuccession::Pending(PendingTransfer {
            target,
            initiated_at: now,
        });
    }

    /// Check whether `caller` may complete the pending transfer at `now`.
    ///
    /// Returns the new admin on success; the state is not modified.
    pub fn check_completion(
        &self,
        caller: &Identity,
        now: Tick,
        timelock: u64,
    ) -> CarbonResult<Identity> {
        let pending = self.pending().ok_or(CarbonError::Unauthorized)?;
        if &pending.target != caller {
            return Err(CarbonError::Unauthorized);
        }
        if now.since(pending.initiated_at) < timelock {
            return Err(CarbonError::TransferDelayActive);
        }
        Ok(pending.target.clone())
    }

    /// Return to `Idle`.
    pub fn clear(&mut self) {
        *self = AdminSuccession::Idle;
    }
}
