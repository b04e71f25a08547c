//! # CarbonFlow Testkit - Layer 4: Test Infrastructure
//!
//! Common setup for engine tests: well-known identities, project specs,
//! a [`Harness`] that pairs an engine with a logical clock, and proptest
//! strategies over engine commands.
//!
//! ```rust,ignore
//! use carbonflow_testkit::*;
//!
//! let mut h = Harness::new();
//! let id = h.as_caller(&wallet(1)).register_project(forest_spec())?;
//! h.mine_blocks(144);
//! ```

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(missing_docs)]

pub mod fixtures;
pub mod harness;
pub mod strategies;

pub use fixtures::*;
pub use harness::{CallerScope, Harness};

use tracing_subscriber::EnvFilter;

/// Install a test-writer subscriber honoring `RUST_LOG`. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
