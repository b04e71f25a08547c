//! Proptest strategies over engine inputs.
//!
//! Identities are drawn from a small pool so that generated sequences hit
//! ownership, oracle and rate-limit interactions often.

use carbonflow_core::{Amount, BoundingBox, Identity, ProjectId, ProjectSpec, ProjectStatus};
use carbonflow_engine::Command;
use proptest::prelude::*;

pub use proptest;

use crate::fixtures::{deployer, wallet};

/// Deployer or one of four wallets.
pub fn arb_identity() -> impl Strategy<Value = Identity> {
    prop_oneof![
        1 => Just(deployer()),
        4 => (1u32..=4).prop_map(wallet),
    ]
}

/// Ids of the first few projects plus an occasional unknown one.
pub fn arb_project_id() -> impl Strategy<Value = ProjectId> {
    (1u64..=6).prop_map(ProjectId)
}

pub fn arb_status() -> impl Strategy<Value = ProjectStatus> {
    prop_oneof![
        Just(ProjectStatus::Active),
        Just(ProjectStatus::Paused),
        Just(ProjectStatus::Terminated),
    ]
}

/// Mostly valid specs, with inverted boxes, small areas and bad types mixed in.
pub fn arb_spec() -> impl Strategy<Value = ProjectSpec> {
    let bounds = (
        -90_000_000i64..90_000_000,
        0i64..1_000_000,
        -180_000_000i64..180_000_000,
        -1_000i64..1_000_000,
    )
        .prop_map(|(lat, dlat, lon, dlon)| BoundingBox::new(lat, lat + dlat, lon, lon + dlon));
    let project_type = prop_oneof![
        4 => Just("forest".to_string()),
        2 => Just("mangrove".to_string()),
        1 => Just(String::new()),
        1 => Just("x".repeat(40)),
    ];
    (bounds, 500u64..20_000, project_type)
        .prop_map(|(bounds, area, project_type)| ProjectSpec::new(bounds, area, project_type))
}

fn arb_amount() -> impl Strategy<Value = Amount> {
    prop_oneof![
        Just(0u128),
        1u128..1_000,
        1_000_000u128..500_000_000,
    ]
}

pub fn arb_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        6 => arb_spec().prop_map(Command::RegisterProject),
        2 => prop::collection::vec(arb_spec(), 0..4).prop_map(Command::BatchRegisterProjects),
        2 => (arb_project_id(), arb_status())
            .prop_map(|(project_id, status)| Command::UpdateProjectStatus { project_id, status }),
        2 => arb_identity().prop_map(Command::AuthorizeOracle),
        1 => arb_identity().prop_map(Command::RevokeOracle),
        6 => (arb_project_id(), 0u64..1_000).prop_map(|(project_id, carbon_tons)| {
            Command::VerifyAndMint { project_id, carbon_tons }
        }),
        6 => (arb_amount(), arb_identity())
            .prop_map(|(amount, recipient)| Command::TransferCredits { amount, recipient }),
        4 => (arb_project_id(), arb_amount())
            .prop_map(|(project_id, amount)| Command::ContributeToInsurance { project_id, amount }),
        1 => arb_identity().prop_map(Command::InitiateAdminTransfer),
        1 => Just(Command::CompleteAdminTransfer),
        1 => Just(Command::ActivateEmergencyMode),
        1 => Just(Command::DeactivateEmergencyMode),
        1 => (arb_identity(), any::<bool>())
            .prop_map(|(user, blacklisted)| Command::BlacklistUser { user, blacklisted }),
        1 => Just(Command::ResetCircuitBreaker),
    ]
}

/// One step of a run: caller, ticks to advance first, command.
pub fn arb_step() -> impl Strategy<Value = (Identity, u64, Command)> {
    (arb_identity(), prop_oneof![3 => Just(0u64), 2 => 1u64..4, 1 => 10u64..200], arb_command())
}
