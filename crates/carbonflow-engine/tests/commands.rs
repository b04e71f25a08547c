//! Command dispatch, JSON decoding and the shared single-writer handle.

#![allow(clippy::unwrap_used)]

use carbonflow_core::{CallContext, CarbonError, ProjectId, Tick};
use carbonflow_engine::{Command, Outcome, SharedEngine};
use carbonflow_testkit::*;
use std::thread;

#[test]
fn test_commands_decode_from_json() {
    let json = r#"[
        {"register_project": {
            "bounds": {
                "lat_min": -45000000, "lat_max": -44000000,
                "lon_min": 170000000, "lon_max": 171000000
            },
            "area": 5000,
            "project_type": "forest"
        }},
        {"authorize_oracle": "wallet_4"},
        {"verify_and_mint": {"project_id": 1, "carbon_tons": 100}},
        {"transfer_credits": {"amount": 50000000, "recipient": "wallet_2"}},
        "complete_admin_transfer"
    ]"#;
    let commands: Vec<Command> = serde_json::from_str(json).unwrap();
    assert_eq!(commands[0], Command::RegisterProject(forest_spec()));
    assert_eq!(commands[1], Command::AuthorizeOracle(oracle()));
    assert_eq!(
        commands[3],
        Command::TransferCredits {
            amount: 50_000_000,
            recipient: wallet(2),
        }
    );
    assert_eq!(commands[4], Command::CompleteAdminTransfer);
    assert_eq!(commands[2].name(), "verify_and_mint");
    assert!(commands[2].is_gated());
    assert!(!commands[1].is_gated());
}

#[test]
fn test_replayed_commands_reach_same_state() {
    let script = vec![
        (wallet(1), Command::RegisterProject(forest_spec())),
        (deployer(), Command::AuthorizeOracle(oracle())),
        (
            oracle(),
            Command::VerifyAndMint {
                project_id: ProjectId(1),
                carbon_tons: 100,
            },
        ),
        (
            wallet(1),
            Command::TransferCredits {
                amount: 50_000_000,
                recipient: wallet(2),
            },
        ),
    ];

    let mut first = Harness::new();
    let mut second = Harness::new();
    let mut outcomes = Vec::new();
    for (caller, command) in &script {
        outcomes.push(first.as_caller(caller).run(command.clone()).unwrap());
        second.as_caller(caller).run(command.clone()).unwrap();
    }
    assert_eq!(outcomes[0], Outcome::Registered(ProjectId(1)));
    assert_eq!(outcomes[2], Outcome::Minted(100_000_000));
    assert_eq!(outcomes[3], Outcome::Done);
    assert_eq!(first.engine, second.engine);
    assert_eq!(second.engine.get_user_balance(&wallet(2)), 50_000_000);
}

#[test]
fn test_outcome_serializes() {
    let outcome = Outcome::BatchRegistered(vec![ProjectId(1), ProjectId(2)]);
    let value = serde_json::to_value(outcome).unwrap();
    assert_eq!(value, serde_json::json!({"batch_registered": [1, 2]}));
}

#[test]
fn test_shared_engine_serializes_writers() {
    init_test_tracing();
    let shared = SharedEngine::with_admin(deployer());

    let handles: Vec<_> = (1..=4)
        .map(|n| {
            let shared = shared.clone();
            thread::spawn(move || {
                let ctx = CallContext::new(wallet(n), Tick(0));
                (0..5)
                    .map(|i| shared.submit(&ctx, Command::RegisterProject(offset_spec(i))))
                    .collect::<Vec<_>>()
            })
        })
        .collect();
    for handle in handles {
        for result in handle.join().unwrap() {
            assert!(matches!(result, Ok(Outcome::Registered(_))));
        }
    }

    shared.read(|engine| {
        assert_eq!(engine.get_contract_stats().total_projects, 20);
        for n in 1..=4 {
            assert_eq!(engine.project_count(&wallet(n)), 5);
        }
        assert_eq!(engine.audit(), Ok(()));
    });
    let ids: Vec<_> = shared.snapshot().registry().projects().map(|(id, _)| id).collect();
    assert_eq!(ids, (1..=20).map(ProjectId).collect::<Vec<_>>());
}

#[test]
fn test_shared_engine_rejections_propagate() {
    let shared = SharedEngine::with_admin(deployer());
    let ctx = CallContext::new(wallet(1), Tick(0));
    assert_eq!(
        shared.submit(&ctx, Command::ActivateEmergencyMode),
        Err(CarbonError::Unauthorized)
    );
    assert!(!shared.check_circuit_breaker());
}
