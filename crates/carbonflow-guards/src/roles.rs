//! Closed set of caller-role requirements.
//!
//! All authorization decisions in the engine are expressed as one of these
//! requirements and evaluated by [`SecurityControl::authorize`], so the
//! complete role model is readable in one place.
//!
//! [`SecurityControl::authorize`]: crate::SecurityControl::authorize

use carbonflow_core::{CarbonError, Identity};

/// What an operation requires of its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement<'a> {
    /// Caller must be the current admin
    Admin,
    /// Caller must be in the oracle registry (membership supplied by the ledger)
    Oracle { registered: bool },
    /// Caller must own the entity or be the current admin
    OwnerOrAdmin { owner: &'a Identity },
}

impl Requirement<'_> {
    /// Error returned when the requirement is not met.
    pub fn denial(&self) -> CarbonError {
        match self {
            Requirement::Oracle { .. } => CarbonError::OracleNotAuthorized,
            Requirement::Admin | Requirement::OwnerOrAdmin { .. } => CarbonError::Unauthorized,
        }
    }

    /// Whether `caller` satisfies the requirement given the current `admin`.
    pub fn is_met_by(&self, caller: &Identity, admin: &Identity) -> bool {
        match self {
            Requirement::Admin => caller == admin,
            Requirement::Oracle { registered } => *registered,
            Requirement::OwnerOrAdmin { owner } => caller == *owner || caller == admin,
        }
    }
}
