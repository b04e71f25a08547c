//! # CarbonFlow Engine - Layer 3: State Store
//!
//! The deterministic carbon-credit engine: project registry, credit ledger,
//! insurance pool and the security gate wired in front of them.
//!
//! Every mutating operation takes a [`CallContext`](carbonflow_core::CallContext)
//! and either succeeds completely or returns a
//! [`CarbonError`](carbonflow_core::CarbonError) with no state change at all.
//!
//! ```rust,ignore
//! let mut engine = CarbonEngine::new(Identity::new("deployer"));
//! let id = engine.register_project(&CallContext::new("wallet_1", Tick(1)), spec)?;
//! ```

#![allow(missing_docs)]
#![forbid(unsafe_code)]

/// Conservation-law audit
pub mod audit;

/// Serializable commands and their dispatch
pub mod command;

/// Engine state and operations
pub mod engine;

/// Per-project insurance pools
pub mod insurance;

/// Balances and oracle registry
pub mod ledger;

/// Project records and id allocation
pub mod registry;

/// Thread-safe single-writer handle
pub mod shared;

pub use audit::InvariantViolation;
pub use command::{Command, Outcome};
pub use engine::{CarbonEngine, ContractStats};
pub use insurance::InsurancePool;
pub use ledger::CreditLedger;
pub use registry::ProjectRegistry;
pub use shared::SharedEngine;
