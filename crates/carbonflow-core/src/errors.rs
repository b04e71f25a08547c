//! Unified error system for the CarbonFlow engine
//!
//! Every rejection the engine can produce is one variant of [`CarbonError`].
//! Errors are local and deterministic: the engine never retries, it rejects
//! and leaves the caller to decide. Numeric codes are the wire representation
//! used by external interfaces and stay stable across releases.

use serde::{Deserialize, Serialize};

/// Unified error type for all engine operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
pub enum CarbonError {
    /// Caller lacks the role required for the operation
    #[error("Unauthorized caller")]
    Unauthorized,

    /// No project is registered under the requested id
    #[error("Project not found")]
    ProjectNotFound,

    /// Amount outside the accepted domain (e.g. project area below minimum)
    #[error("Invalid amount")]
    InvalidAmount,

    /// Caller is not a registered oracle
    #[error("Oracle not authorized")]
    OracleNotAuthorized,

    /// Bounding box is empty or inverted
    #[error("Invalid coordinates")]
    InvalidCoordinates,

    /// Contract is paused (emergency mode)
    #[error("Contract paused")]
    ContractPaused,

    /// Checked addition or multiplication left the unsigned range
    #[error("Arithmetic overflow")]
    Overflow,

    /// Checked subtraction would go below zero
    #[error("Arithmetic underflow")]
    Underflow,

    /// Caller exhausted its action budget for the current rate window
    #[error("Rate limited")]
    RateLimited,

    /// Owner already holds the maximum number of projects
    #[error("Maximum projects per owner exceeded")]
    MaxProjectsExceeded,

    /// Caller is on the blacklist
    #[error("Caller blacklisted")]
    Blacklisted,

    /// Malformed input (zero contribution, oversized batch, bad text)
    #[error("Invalid input")]
    InvalidInput,

    /// Admin succession timelock has not elapsed
    #[error("Admin transfer delay still active")]
    TransferDelayActive,
}

impl CarbonError {
    /// Every error kind, in code order.
    pub const ALL: [CarbonError; 13] = [
        CarbonError::Unauthorized,
        CarbonError::ProjectNotFound,
        CarbonError::InvalidAmount,
        CarbonError::OracleNotAuthorized,
        CarbonError::InvalidCoordinates,
        CarbonError::ContractPaused,
        CarbonError::Overflow,
        CarbonError::Underflow,
        CarbonError::RateLimited,
        CarbonError::MaxProjectsExceeded,
        CarbonError::Blacklisted,
        CarbonError::InvalidInput,
        CarbonError::TransferDelayActive,
    ];

    /// Stable wire code for this error kind.
    #[must_use]
    #[inline]
    pub const fn code(self) -> u32 {
        match self {
            CarbonError::Unauthorized => 100,
            CarbonError::ProjectNotFound => 101,
            CarbonError::InvalidAmount => 104,
            CarbonError::OracleNotAuthorized => 106,
            CarbonError::InvalidCoordinates => 109,
            CarbonError::ContractPaused => 111,
            CarbonError::Overflow => 113,
            CarbonError::Underflow => 114,
            CarbonError::RateLimited => 115,
            CarbonError::MaxProjectsExceeded => 116,
            CarbonError::Blacklisted => 117,
            CarbonError::InvalidInput => 118,
            CarbonError::TransferDelayActive => 121,
        }
    }

    /// Decode a wire code back into an error kind.
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|err| err.code() == code)
    }

    /// Whether the error was raised by the security gate rather than domain validation.
    pub fn is_gate_rejection(self) -> bool {
        matches!(
            self,
            CarbonError::ContractPaused | CarbonError::Blacklisted | CarbonError::RateLimited
        )
    }
}

/// Standard Result type for engine operations
pub type CarbonResult<T> = std::result::Result<T, CarbonError>;
