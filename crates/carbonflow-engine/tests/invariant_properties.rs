//! Property tests over random command sequences
//!
//! - Conservation: balances, project credits and the minted total always agree,
//!   and so do pools, project coverage and the insurance total
//! - Rejection leaves no trace: a failed command compares equal to the
//!   state captured before it ran

#![allow(clippy::unwrap_used)]

use carbonflow_core::CarbonError;
use carbonflow_engine::{CarbonEngine, Command, Outcome};
use carbonflow_testkit::strategies::{arb_command, arb_step};
use carbonflow_testkit::*;
use proptest::prelude::*;

/// Engine with a registered project and an authorized oracle, so minting is reachable.
fn seeded() -> Harness {
    let mut h = Harness::new();
    h.as_caller(&wallet(1)).register_project(forest_spec()).unwrap();
    h.as_caller(&wallet(2)).register_project(offset_spec(7)).unwrap();
    h.as_caller(&deployer()).authorize_oracle(&oracle()).unwrap();
    h
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: conservation laws hold after every step
    #[test]
    fn conservation_holds(steps in prop::collection::vec(arb_step(), 1..60)) {
        let mut h = seeded();
        for (caller, advance, command) in steps {
            h.mine_blocks(advance);
            let _ = h.as_caller(&caller).run(command);
            prop_assert_eq!(h.engine.audit(), Ok(()));
        }
    }

    /// Property: a rejected command changes nothing observable
    #[test]
    fn rejection_is_pure(steps in prop::collection::vec(arb_step(), 1..60)) {
        let mut h = seeded();
        for (caller, advance, command) in steps {
            h.mine_blocks(advance);
            let before: CarbonEngine = h.engine.clone();
            if h.as_caller(&caller).run(command).is_err() {
                prop_assert_eq!(&h.engine, &before);
            }
        }
    }

    /// Property: a gated command never succeeds for a blacklisted caller
    #[test]
    fn blacklisted_callers_are_always_rejected(command in arb_command()) {
        let mut h = seeded();
        h.as_caller(&deployer()).blacklist(&wallet(3), true).unwrap();
        let result = h.as_caller(&wallet(3)).run(command.clone());
        if command.is_gated() {
            prop_assert_eq!(result, Err(CarbonError::Blacklisted));
        }
    }

    /// Property: minting returns exactly tons times the credit rate
    #[test]
    fn mint_amount_is_exact(tons in 0u64..u64::MAX) {
        let mut h = seeded();
        let minted = h.as_caller(&oracle()).run(Command::VerifyAndMint {
            project_id: carbonflow_core::ProjectId(1),
            carbon_tons: tons,
        });
        prop_assert_eq!(minted, Ok(Outcome::Minted(u128::from(tons) * 1_000_000)));
        prop_assert_eq!(h.engine.get_user_balance(&wallet(1)), u128::from(tons) * 1_000_000);
    }
}
