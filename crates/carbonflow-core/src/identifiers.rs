//! Core identifier types
//!
//! `Identity` is an opaque principal supplied by the transaction layer; the
//! engine only compares it for equality and uses it as a map key.
//! `ProjectId` is allocated sequentially by the project registry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque caller principal (wallet address, contract principal, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Create a new identity from its textual principal.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the underlying principal text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Identity {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<&Identity> for Identity {
    fn from(value: &Identity) -> Self {
        value.clone()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sequential project identifier. The first registered project is `ProjectId(1)`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ProjectId(pub u64);

impl ProjectId {
    /// Id assigned to the first project.
    pub const FIRST: ProjectId = ProjectId(1);

    /// The id following this one, or `None` if the id space is exhausted.
    pub fn next(self) -> Option<ProjectId> {
        self.0.checked_add(1).map(ProjectId)
    }
}

impl From<u64> for ProjectId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "project-{}", self.0)
    }
}
