//! # CarbonFlow Core - Layer 1: Foundation
//!
//! Identifiers, the unified error type, the arithmetic guard, logical time
//! and project domain types shared by every other crate in the workspace.
//! Pure data and pure functions only; no engine state lives here.
//!
//! - `errors`: [`CarbonError`] with stable wire codes
//! - `arithmetic`: checked add/sub/mul, the only way balances change
//! - `time`: [`Tick`] and the environment-owned [`LogicalClock`]
//! - `config`: [`EngineConfig`] loaded from TOML and `CARBONFLOW_*` variables

#![allow(missing_docs)]
#![forbid(unsafe_code)]

/// Checked arithmetic over amounts and counters
pub mod arithmetic;

/// Engine configuration and validation
pub mod config;

/// Per-call caller/tick context
pub mod context;

/// Unified error handling
pub mod errors;

/// Identity and project identifiers
pub mod identifiers;

/// Project records and registration specs
pub mod project;

/// Logical clock
pub mod time;

pub use arithmetic::{safe_add, safe_increment, safe_mul, safe_sub, Amount};
pub use config::{ConfigError, EngineConfig};
pub use context::CallContext;
pub use errors::{CarbonError, CarbonResult};
pub use identifiers::{Identity, ProjectId};
pub use project::{BoundingBox, Project, ProjectSpec, ProjectStatus};
pub use time::{LogicalClock, Tick};
