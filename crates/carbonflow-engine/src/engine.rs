//! The engine state store.
//!
//! [`CarbonEngine`] owns every piece of state: the security control plane,
//! the project registry, the credit ledger and the insurance pool. Each
//! mutating operation takes a [`CallContext`] and follows the same shape:
//!
//! 1. gate (`SecurityControl::admit`) or role check
//! 2. domain validation and checked arithmetic, computing new values
//! 3. writes, then committing the gate admission
//!
//! Nothing is written before step 3, so a rejected call leaves the engine
//! exactly as it was.

use crate::audit::{self, InvariantViolation};
use crate::insurance::InsurancePool;
use crate::ledger::CreditLedger;
use crate::registry::ProjectRegistry;
use carbonflow_core::{
    safe_add, safe_mul, Amount, CallContext, CarbonError, CarbonResult, ConfigError,
    EngineConfig, Identity, Project, ProjectId, ProjectSpec, ProjectStatus, Tick,
};
use carbonflow_guards::{PendingTransfer, Requirement, SecurityControl, SecurityStatus};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Aggregate figures for dashboards and monitoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractStats {
    pub total_projects: u64,
    pub total_credits_minted: Amount,
    pub total_insurance_pool: Amount,
    pub contract_admin: Identity,
}

/// Single owned state store for every engine operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarbonEngine {
    config: EngineConfig,
    security: SecurityControl,
    registry: ProjectRegistry,
    ledger: CreditLedger,
    insurance: InsurancePool,
    /// Tick of the last successful mutation
    last_tick: Tick,
}

impl CarbonEngine {
    /// Engine with default protocol parameters, administered by `admin`.
    pub fn new(admin: Identity) -> Self {
        Self::build(admin, EngineConfig::default())
    }

    /// Engine with custom parameters; the config is validated first.
    pub fn with_config(admin: Identity, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(admin, config))
    }

    fn build(admin: Identity, config: EngineConfig) -> Self {
        info!(%admin, "engine initialized");
        Self {
            security: SecurityControl::new(admin, &config),
            config,
            registry: ProjectRegistry::new(),
            ledger: CreditLedger::new(),
            insurance: InsurancePool::new(),
            last_tick: Tick::GENESIS,
        }
    }

    /// Run a mutating operation at `ctx.now`.
    ///
    /// Rejects ticks earlier than the last successful mutation and records
    /// the tick only when `op` succeeds.
    fn apply<T>(
        &mut self,
        ctx: &CallContext,
        op: impl FnOnce(&mut Self) -> CarbonResult<T>,
    ) -> CarbonResult<T> {
        if ctx.now < self.last_tick {
            debug!(now = %ctx.now, last = %self.last_tick, "rejected: clock moved backwards");
            return Err(CarbonError::InvalidInput);
        }
        let result = op(self).map_err(|err| {
            debug!(
                caller = %ctx.caller,
                %err,
                code = err.code(),
                gate = err.is_gate_rejection(),
                "operation rejected"
            );
            err
        })?;
        self.last_tick = ctx.now;
        Ok(result)
    }

    // === Project Registry ===

    pub fn register_project(
        &mut self,
        ctx: &CallContext,
        spec: ProjectSpec,
    ) -> CarbonResult<ProjectId> {
        self.apply(ctx, |engine| {
            register_into(
                &mut engine.security,
                &mut engine.registry,
                &engine.config,
                ctx,
                spec,
            )
        })
    }

    /// Register every spec or none of them.
    ///
    /// Each entry passes the gate (and is charged a rate-limit action) and
    /// validation in order; the first failure discards the whole batch.
    pub fn batch_register_projects(
        &mut self,
        ctx: &CallContext,
        specs: Vec<ProjectSpec>,
    ) -> CarbonResult<Vec<ProjectId>> {
        self.apply(ctx, |engine| {
            engine.security.check_open(&ctx.caller)?;
            if specs.len() > engine.config.max_batch_size as usize {
                debug!(len = specs.len(), "rejected: batch too large");
                return Err(CarbonError::InvalidInput);
            }

            let mut security = engine.security.clone();
            let mut registry = engine.registry.clone();
            let mut ids = Vec::with_capacity(specs.len());
            for (index, spec) in specs.into_iter().enumerate() {
                let id = register_into(&mut security, &mut registry, &engine.config, ctx, spec)
                    .map_err(|err| {
                        debug!(index, %err, "batch registration aborted");
                        err
                    })?;
                ids.push(id);
            }
            engine.security = security;
            engine.registry = registry;
            Ok(ids)
        })
    }

    pub fn update_project_status(
        &mut self,
        ctx: &CallContext,
        project_id: ProjectId,
        status: ProjectStatus,
    ) -> CarbonResult<()> {
        self.apply(ctx, |engine| {
            let admission = engine.security.admit(ctx)?;
            let project = engine.registry.require(project_id)?;
            engine
                .security
                .authorize(&ctx.caller, Requirement::OwnerOrAdmin { owner: &project.owner })?;

            engine.registry.set_status(project_id, status)?;
            engine.security.commit(admission);
            debug!(%project_id, %status, by = %ctx.caller, "project status updated");
            Ok(())
        })
    }

    // === Credit Ledger ===

    pub fn authorize_oracle(&mut self, ctx: &CallContext, oracle: Identity) -> CarbonResult<()> {
        self.apply(ctx, |engine| {
            engine.security.authorize(&ctx.caller, Requirement::Admin)?;
            info!(%oracle, "oracle authorized");
            engine.ledger.authorize_oracle(oracle);
            Ok(())
        })
    }

    pub fn revoke_oracle(&mut self, ctx: &CallContext, oracle: Identity) -> CarbonResult<()> {
        self.apply(ctx, |engine| {
            engine.security.authorize(&ctx.caller, Requirement::Admin)?;
            engine.ledger.revoke_oracle(&oracle);
            info!(%oracle, "oracle revoked");
            Ok(())
        })
    }

    /// Mint credits for a verified measurement; returns the micro-credits minted.
    pub fn verify_and_mint(
        &mut self,
        ctx: &CallContext,
        project_id: ProjectId,
        carbon_tons: u64,
    ) -> CarbonResult<Amount> {
        self.apply(ctx, |engine| {
            let admission = engine.security.admit(ctx)?;
            engine.security.authorize(
                &ctx.caller,
                Requirement::Oracle {
                    registered: engine.ledger.is_oracle(&ctx.caller),
                },
            )?;
            let project = engine.registry.require(project_id)?;
            let credits = safe_mul(Amount::from(carbon_tons), engine.config.credit_rate())?;
            let project_minted = safe_add(project.credits_minted, credits)?;
            let owner = project.owner.clone();

            engine.ledger.mint(&owner, credits)?;
            if let Some(project) = engine.registry.get_mut(project_id) {
                project.credits_minted = project_minted;
            }
            engine.security.commit(admission);
            info!(
                %project_id,
                %owner,
                carbon_tons,
                credits,
                oracle = %ctx.caller,
                "credits minted"
            );
            Ok(credits)
        })
    }

    pub fn transfer_credits(
        &mut self,
        ctx: &CallContext,
        amount: Amount,
        recipient: Identity,
    ) -> CarbonResult<()> {
        self.apply(ctx, |engine| {
            let admission = engine.security.admit(ctx)?;
            engine.ledger.transfer(&ctx.caller, &recipient, amount)?;
            engine.security.commit(admission);
            info!(from = %ctx.caller, to = %recipient, amount, "credits transferred");
            Ok(())
        })
    }

    // === Insurance Pool ===

    /// Contribute to a project's insurance pool, then re-evaluate the circuit breaker.
    pub fn contribute_to_insurance(
        &mut self,
        ctx: &CallContext,
        project_id: ProjectId,
        amount: Amount,
    ) -> CarbonResult<()> {
        self.apply(ctx, |engine| {
            let admission = engine.security.admit(ctx)?;
            let project = engine.registry.require(project_id)?;
            if amount == 0 {
                return Err(CarbonError::InvalidInput);
            }
            let covered = safe_add(project.insurance_covered, amount)?;

            engine.insurance.contribute(project_id, amount)?;
            if let Some(project) = engine.registry.get_mut(project_id) {
                project.insurance_covered = covered;
            }
            engine.security.commit(admission);
            info!(%project_id, amount, from = %ctx.caller, "insurance contribution");

            engine
                .security
                .evaluate_circuit_breaker(engine.insurance.total());
            Ok(())
        })
    }

    // === Security Control Plane ===

    pub fn initiate_admin_transfer(
        &mut self,
        ctx: &CallContext,
        target: Identity,
    ) -> CarbonResult<()> {
        self.apply(ctx, |engine| engine.security.initiate_admin_transfer(ctx, target))
    }

    pub fn complete_admin_transfer(&mut self, ctx: &CallContext) -> CarbonResult<()> {
        self.apply(ctx, |engine| engine.security.complete_admin_transfer(ctx))
    }

    pub fn activate_emergency_mode(&mut self, ctx: &CallContext) -> CarbonResult<()> {
        self.apply(ctx, |engine| engine.security.activate_emergency_mode(ctx))
    }

    pub fn deactivate_emergency_mode(&mut self, ctx: &CallContext) -> CarbonResult<()> {
        self.apply(ctx, |engine| engine.security.deactivate_emergency_mode(ctx))
    }

    pub fn blacklist_user(
        &mut self,
        ctx: &CallContext,
        user: Identity,
        blacklisted: bool,
    ) -> CarbonResult<()> {
        self.apply(ctx, |engine| engine.security.blacklist_user(ctx, user, blacklisted))
    }

    pub fn reset_circuit_breaker(&mut self, ctx: &CallContext) -> CarbonResult<()> {
        self.apply(ctx, |engine| engine.security.reset_circuit_breaker(ctx))
    }

    /// Re-evaluate the circuit breaker against the current insurance total.
    pub fn check_circuit_breaker(&mut self) -> bool {
        let total = self.insurance.total();
        self.security.evaluate_circuit_breaker(total)
    }

    // === Read-only queries ===

    pub fn get_project(&self, project_id: ProjectId) -> Option<&Project> {
        self.registry.get(project_id)
    }

    pub fn get_user_balance(&self, who: &Identity) -> Amount {
        self.ledger.balance(who)
    }

    pub fn get_insurance_pool(&self, project_id: ProjectId) -> Option<Amount> {
        self.insurance.pool(project_id)
    }

    pub fn is_contract_paused(&self) -> bool {
        self.security.is_paused()
    }

    pub fn get_security_status(&self) -> SecurityStatus {
        self.security.status()
    }

    pub fn get_contract_stats(&self) -> ContractStats {
        ContractStats {
            total_projects: self.registry.total_projects(),
            total_credits_minted: self.ledger.total_minted(),
            total_insurance_pool: self.insurance.total(),
            contract_admin: self.security.admin().clone(),
        }
    }

    pub fn is_oracle_authorized(&self, who: &Identity) -> bool {
        self.ledger.is_oracle(who)
    }

    pub fn is_blacklisted(&self, who: &Identity) -> bool {
        self.security.is_blacklisted(who)
    }

    pub fn project_count(&self, owner: &Identity) -> u64 {
        self.registry.project_count(owner)
    }

    pub fn pending_admin_transfer(&self) -> Option<&PendingTransfer> {
        self.security.pending_admin_transfer()
    }

    /// Gated actions `who` may still take at `now`.
    pub fn remaining_actions(&self, who: &Identity, now: Tick) -> u64 {
        self.security.rate_limiter().remaining(who, now)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn last_tick(&self) -> Tick {
        self.last_tick
    }

    pub fn registry(&self) -> &ProjectRegistry {
        &self.registry
    }

    pub fn ledger(&self) -> &CreditLedger {
        &self.ledger
    }

    pub fn insurance(&self) -> &InsurancePool {
        &self.insurance
    }

    pub fn security(&self) -> &SecurityControl {
        &self.security
    }

    /// Check both conservation laws against the current state.
    pub fn audit(&self) -> Result<(), InvariantViolation> {
        audit::audit(self)
    }
}

/// Gate, validate and store one registration against the given state.
fn register_into(
    security: &mut SecurityControl,
    registry: &mut ProjectRegistry,
    config: &EngineConfig,
    ctx: &CallContext,
    spec: ProjectSpec,
) -> CarbonResult<ProjectId> {
    let admission = security.admit(ctx)?;
    registry.validate(&ctx.caller, &spec, config)?;
    let project_type = spec.project_type.clone();
    let id = registry.insert(ctx.caller.clone(), spec)?;
    security.commit(admission);
    info!(%id, owner = %ctx.caller, %project_type, "project registered");
    Ok(id)
}
