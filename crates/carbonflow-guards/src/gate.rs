//! Security gate for state-changing operations.
//!
//! The gate runs in a fixed order: pause, blacklist, rate limit. Admission is
//! split in two phases so a rejected operation leaves no trace:
//! [`SecurityControl::admit`] only reads, and the resulting [`Admission`]
//! is committed with [`SecurityControl::commit`] once the operation's own
//! validation has passed.

use crate::control::SecurityControl;
use crate::rate_limit::RateWindow;
use carbonflow_core::{CallContext, CarbonError, CarbonResult, Identity};
use tracing::debug;

/// Proof that a caller passed the gate, carrying the rate window to store.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an admission has no effect until committed"]
pub struct Admission {
    caller: Identity,
    window: RateWindow,
}

impl Admission {
    pub fn caller(&self) -> &Identity {
        &self.caller
    }

    pub fn window(&self) -> RateWindow {
        self.window
    }
}

impl SecurityControl {
    /// Pause and blacklist checks only; used where no rate charge applies.
    pub fn check_open(&self, caller: &Identity) -> CarbonResult<()> {
        if self.is_paused() {
            debug!(%caller, "rejected: contract paused");
            return Err(CarbonError::ContractPaused);
        }
        if self.is_blacklisted(caller) {
            debug!(%caller, "rejected: blacklisted");
            return Err(CarbonError::Blacklisted);
        }
        Ok(())
    }

    /// Run the full gate for `ctx` without modifying any state.
    pub fn admit(&self, ctx: &CallContext) -> CarbonResult<Admission> {
        self.check_open(&ctx.caller)?;
        let window = self
            .rate_limiter
            .check(&ctx.caller, ctx.now)
            .map_err(|err| {
                debug!(caller = %ctx.caller, now = %ctx.now, "rejected: rate limited");
                err
            })?;
        Ok(Admission {
            caller: ctx.caller.clone(),
            window,
        })
    }

    /// Record the rate charge of a successful operation.
    pub fn commit(&mut self, admission: Admission) {
        self.rate_limiter.record(admission.caller, admission.window);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carbonflow_core::{EngineConfig, Tick};

    fn control() -> SecurityControl {
        SecurityControl::new(Identity::new("deployer"), &EngineConfig::default())
    }

    #[test]
    fn test_gate_order_pause_before_blacklist() {
        let mut control = control();
        let admin = CallContext::new("deployer", Tick(0));
        control
            .blacklist_user(&admin, Identity::new("wallet_3"), true)
            .unwrap();
        control.activate_emergency_mode(&admin).unwrap();

        let ctx = CallContext::new("wallet_3", Tick(1));
        assert_eq!(control.admit(&ctx), Err(CarbonError::ContractPaused));

        control.deactivate_emergency_mode(&admin).unwrap();
        assert_eq!(control.admit(&ctx), Err(CarbonError::Blacklisted));
    }

    #[test]
    fn test_blacklist_checked_before_rate_limit() {
        let mut control = control();
        let ctx = CallContext::new("wallet_1", Tick(0));
        for _ in 0..5 {
            let admission = control.admit(&ctx).unwrap();
            control.commit(admission);
        }
        assert_eq!(control.admit(&ctx), Err(CarbonError::RateLimited));

        let admin = CallContext::new("deployer", Tick(0));
        control
            .blacklist_user(&admin, Identity::new("wallet_1"), true)
            .unwrap();
        assert_eq!(control.admit(&ctx), Err(CarbonError::Blacklisted));
    }

    #[test]
    fn test_uncommitted_admission_leaves_no_trace() {
        let control = control();
        let before = control.clone();
        let admission = control.admit(&CallContext::new("wallet_1", Tick(4))).unwrap();
        assert_eq!(admission.window().action_count, 1);
        assert_eq!(admission.caller(), &Identity::new("wallet_1"));
        assert_eq!(control, before);
    }
}
