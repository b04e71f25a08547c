//! # CarbonFlow Guards - Layer 2: Security Control Plane
//!
//! Gate applied to every state-changing engine operation (pause, blacklist,
//! rate limit), the admin-only control operations, the timelocked admin
//! succession state machine and the insurance circuit breaker.

#![allow(missing_docs)]
#![forbid(unsafe_code)]

pub mod circuit_breaker;
pub mod control;
pub mod gate;
pub mod rate_limit;
pub mod roles;
pub mod succession;

pub use circuit_breaker::CircuitBreaker;
pub use control::{SecurityControl, SecurityStatus};
pub use gate::Admission;
pub use rate_limit::{RateLimiter, RateWindow};
pub use roles::Requirement;
pub use succession::{AdminSuccession, PendingTransfer};
