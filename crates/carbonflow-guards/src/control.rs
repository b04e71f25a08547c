//! Process-wide security state and its admin-only operations.

use crate::circuit_breaker::CircuitBreaker;
use crate::rate_limit::RateLimiter;
use crate::roles::Requirement;
use crate::succession::{AdminSuccession, PendingTransfer};
use carbonflow_core::{Amount, CallContext, CarbonResult, EngineConfig, Identity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Snapshot of the three control-plane flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityStatus {
    pub contract_paused: bool,
    pub emergency_mode: bool,
    pub circuit_breaker_active: bool,
}

/// Security control plane state.
///
/// `paused` and `emergency_mode` only change together through the emergency
/// operations, so `emergency_mode` implies `paused`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityControl {
    pub(crate) admin: Identity,
    pub(crate) paused: bool,
    pub(crate) emergency_mode: bool,
    pub(crate) blacklist: BTreeSet<Identity>,
    pub(crate) rate_limiter: RateLimiter,
    pub(crate) succession: AdminSuccession,
    pub(crate) circuit_breaker: CircuitBreaker,
    admin_timelock: u64,
}

impl SecurityControl {
    /// Fresh control plane administered by `admin`.
    pub fn new(admin: Identity, config: &EngineConfig) -> Self {
        Self {
            admin,
            paused: false,
            emergency_mode: false,
            blacklist: BTreeSet::new(),
            rate_limiter: RateLimiter::new(config.rate_window, config.max_actions_per_window),
            succession: AdminSuccession::Idle,
            circuit_breaker: CircuitBreaker::new(config.circuit_threshold_amount()),
            admin_timelock: config.admin_timelock,
        }
    }

    pub fn admin(&self) -> &Identity {
        &self.admin
    }

    pub fn is_admin(&self, who: &Identity) -> bool {
        &self.admin == who
    }

    pub fn is_paused(&self) -> bool {
        self.paused || self.emergency_mode
    }

    pub fn is_blacklisted(&self, who: &Identity) -> bool {
        self.blacklist.contains(who)
    }

    pub fn pending_admin_transfer(&self) -> Option<&PendingTransfer> {
        self.succession.pending()
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    pub fn status(&self) -> SecurityStatus {
        SecurityStatus {
            contract_paused: self.is_paused(),
            emergency_mode: self.emergency_mode,
            circuit_breaker_active: self.circuit_breaker.is_active(),
        }
    }

    /// Evaluate a role requirement for `caller`.
    pub fn authorize(&self, caller: &Identity, requirement: Requirement<'_>) -> CarbonResult<()> {
        if requirement.is_met_by(caller, &self.admin) {
            Ok(())
        } else {
            debug!(%caller, ?requirement, "authorization denied");
            Err(requirement.denial())
        }
    }

    pub fn activate_emergency_mode(&mut self, ctx: &CallContext) -> CarbonResult<()> {
        self.authorize(&ctx.caller, Requirement::Admin)?;
        self.emergency_mode = true;
        self.paused = true;
        warn!(admin = %ctx.caller, now = %ctx.now, "emergency mode activated");
        Ok(())
    }

    pub fn deactivate_emergency_mode(&mut self, ctx: &CallContext) -> CarbonResult<()> {
        self.authorize(&ctx.caller, Requirement::Admin)?;
        self.emergency_mode = false;
        self.paused = false;
        warn!(admin = %ctx.caller, now = %ctx.now, "emergency mode deactivated");
        Ok(())
    }

    /// Add (`blacklisted = true`) or remove an identity from the blacklist.
    pub fn blacklist_user(
        &mut self,
        ctx: &CallContext,
        who: Identity,
        blacklisted: bool,
    ) -> CarbonResult<()> {
        self.authorize(&ctx.caller, Requirement::Admin)?;
        warn!(%who, blacklisted, "blacklist updated");
        if blacklisted {
            self.blacklist.insert(who);
        } else {
            self.blacklist.remove(&who);
        }
        Ok(())
    }

    pub fn initiate_admin_transfer(
        &mut self,
        ctx: &CallContext,
        target: Identity,
    ) -> CarbonResult<()> {
        self.authorize(&ctx.caller, Requirement::Admin)?;
        self.succession.initiate(target, ctx.now);
        if let Some(pending) = self.succession.pending() {
            warn!(
                admin = %ctx.caller,
                target = %pending.target,
                unlocks_at = %pending.unlocks_at(self.admin_timelock),
                "admin transfer initiated"
            );
        }
        Ok(())
    }

    pub fn complete_admin_transfer(&mut self, ctx: &CallContext) -> CarbonResult<()> {
        let new_admin = self
            .succession
            .check_completion(&ctx.caller, ctx.now, self.admin_timelock)?;
        warn!(previous = %self.admin, admin = %new_admin, "admin transfer completed");
        self.admin = new_admin;
        self.succession.clear();
        Ok(())
    }

    /// Re-evaluate the circuit breaker against the aggregate insurance pool.
    pub fn evaluate_circuit_breaker(&mut self, total_pool: Amount) -> bool {
        if self.circuit_breaker.evaluate(total_pool) {
            warn!(
                total_pool,
                threshold = self.circuit_breaker.threshold(),
                "circuit breaker tripped"
            );
        }
        self.circuit_breaker.is_active()
    }

    pub fn reset_circuit_breaker(&mut self, ctx: &CallContext) -> CarbonResult<()> {
        self.authorize(&ctx.caller, Requirement::Admin)?;
        self.circuit_breaker.reset();
        info!(admin = %ctx.caller, "circuit breaker reset");
        Ok(())
    }
}
