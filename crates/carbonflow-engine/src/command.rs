//! Serializable mutating operations.
//!
//! [`Command`] names every state-changing operation of the engine so that
//! calls can be queued, replayed or read from JSON. [`CarbonEngine::execute`]
//! dispatches a command to the matching method.

use crate::engine::CarbonEngine;
use carbonflow_core::{
    Amount, CallContext, CarbonResult, Identity, ProjectId, ProjectSpec, ProjectStatus,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    RegisterProject(ProjectSpec),
    BatchRegisterProjects(Vec<ProjectSpec>),
    UpdateProjectStatus {
        project_id: ProjectId,
        status: ProjectStatus,
    },
    AuthorizeOracle(Identity),
    RevokeOracle(Identity),
    VerifyAndMint {
        project_id: ProjectId,
        carbon_tons: u64,
    },
    TransferCredits {
        amount: Amount,
        recipient: Identity,
    },
    ContributeToInsurance {
        project_id: ProjectId,
        amount: Amount,
    },
    InitiateAdminTransfer(Identity),
    CompleteAdminTransfer,
    ActivateEmergencyMode,
    DeactivateEmergencyMode,
    BlacklistUser {
        user: Identity,
        blacklisted: bool,
    },
    ResetCircuitBreaker,
}

impl Command {
    /// Operation name, as used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::RegisterProject(_) => "register_project",
            Command::BatchRegisterProjects(_) => "batch_register_projects",
            Command::UpdateProjectStatus { .. } => "update_project_status",
            Command::AuthorizeOracle(_) => "authorize_oracle",
            Command::RevokeOracle(_) => "revoke_oracle",
            Command::VerifyAndMint { .. } => "verify_and_mint",
            Command::TransferCredits { .. } => "transfer_credits",
            Command::ContributeToInsurance { .. } => "contribute_to_insurance",
            Command::InitiateAdminTransfer(_) => "initiate_admin_transfer",
            Command::CompleteAdminTransfer => "complete_admin_transfer",
            Command::ActivateEmergencyMode => "activate_emergency_mode",
            Command::DeactivateEmergencyMode => "deactivate_emergency_mode",
            Command::BlacklistUser { .. } => "blacklist_user",
            Command::ResetCircuitBreaker => "reset_circuit_breaker",
        }
    }

    /// Whether the command passes the pause/blacklist/rate-limit gate.
    pub fn is_gated(&self) -> bool {
        matches!(
            self,
            Command::RegisterProject(_)
                | Command::BatchRegisterProjects(_)
                | Command::UpdateProjectStatus { .. }
                | Command::VerifyAndMint { .. }
                | Command::TransferCredits { .. }
                | Command::ContributeToInsurance { .. }
        )
    }
}

/// Result of a successful [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Registered(ProjectId),
    BatchRegistered(Vec<ProjectId>),
    Minted(Amount),
    Done,
}

impl CarbonEngine {
    pub fn execute(&mut self, ctx: &CallContext, command: Command) -> CarbonResult<Outcome> {
        tracing::trace!(
            caller = %ctx.caller,
            now = %ctx.now,
            command = command.name(),
            "execute"
        );
        match command {
            Command::RegisterProject(spec) => {
                self.register_project(ctx, spec).map(Outcome::Registered)
            }
            Command::BatchRegisterProjects(specs) => self
                .batch_register_projects(ctx, specs)
                .map(Outcome::BatchRegistered),
            Command::UpdateProjectStatus { project_id, status } => self
                .update_project_status(ctx, project_id, status)
                .map(|()| Outcome::Done),
            Command::AuthorizeOracle(oracle) => {
                self.authorize_oracle(ctx, oracle).map(|()| Outcome::Done)
            }
            Command::RevokeOracle(oracle) => {
                self.revoke_oracle(ctx, oracle).map(|()| Outcome::Done)
            }
            Command::VerifyAndMint {
                project_id,
                carbon_tons,
            } => self
                .verify_and_mint(ctx, project_id, carbon_tons)
                .map(Outcome::Minted),
            Command::TransferCredits { amount, recipient } => self
                .transfer_credits(ctx, amount, recipient)
                .map(|()| Outcome::Done),
            Command::ContributeToInsurance { project_id, amount } => self
                .contribute_to_insurance(ctx, project_id, amount)
                .map(|()| Outcome::Done),
            Command::InitiateAdminTransfer(target) => self
                .initiate_admin_transfer(ctx, target)
                .map(|()| Outcome::Done),
            Command::CompleteAdminTransfer => {
                self.complete_admin_transfer(ctx).map(|()| Outcome::Done)
            }
            Command::ActivateEmergencyMode => {
                self.activate_emergency_mode(ctx).map(|()| Outcome::Done)
            }
            Command::DeactivateEmergencyMode => {
                self.deactivate_emergency_mode(ctx).map(|()| Outcome::Done)
            }
            Command::BlacklistUser { user, blacklisted } => self
                .blacklist_user(ctx, user, blacklisted)
                .map(|()| Outcome::Done),
            Command::ResetCircuitBreaker => {
                self.reset_circuit_breaker(ctx).map(|()| Outcome::Done)
            }
        }
    }
}
