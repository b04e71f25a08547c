//! Project domain types
//!
//! Coordinates are signed micro-degrees, areas are square meters and both
//! credit and insurance figures are micro-denominated.

use crate::arithmetic::Amount;
use crate::errors::CarbonError;
use crate::identifiers::Identity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Geographic bounding box in micro-degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lat_min: i64,
    pub lat_max: i64,
    pub lon_min: i64,
    pub lon_max: i64,
}

impl BoundingBox {
    pub fn new(lat_min: i64, lat_max: i64, lon_min: i64, lon_max: i64) -> Self {
        Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        }
    }

    /// Both axes must be strictly increasing.
    pub fn is_valid(&self) -> bool {
        self.lat_min < self.lat_max && self.lon_min < self.lon_max
    }

    /// Shift the whole box by the same offset on both axes.
    pub fn offset(&self, delta: i64) -> Self {
        Self {
            lat_min: self.lat_min.saturating_add(delta),
            lat_max: self.lat_max.saturating_add(delta),
            lon_min: self.lon_min.saturating_add(delta),
            lon_max: self.lon_max.saturating_add(delta),
        }
    }
}

/// Lifecycle status of a project. Any transition between the three is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Active,
    Paused,
    Terminated,
}

impl ProjectStatus {
    /// Text form used by external interfaces.
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Paused => "paused",
            ProjectStatus::Terminated => "terminated",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = CarbonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ProjectStatus::Active),
            "paused" => Ok(ProjectStatus::Paused),
            "terminated" => Ok(ProjectStatus::Terminated),
            _ => Err(CarbonError::InvalidInput),
        }
    }
}

/// Caller-supplied description of a project to register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSpec {
    pub bounds: BoundingBox,
    /// Square meters
    pub area: u64,
    pub project_type: String,
}

impl ProjectSpec {
    pub fn new(bounds: BoundingBox, area: u64, project_type: impl Into<String>) -> Self {
        Self {
            bounds,
            area,
            project_type: project_type.into(),
        }
    }
}

/// Registered project record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub owner: Identity,
    pub bounds: BoundingBox,
    pub area: u64,
    pub project_type: String,
    pub status: ProjectStatus,
    /// Micro-credits minted against this project
    pub credits_minted: Amount,
    /// Insurance contributed to this project
    pub insurance_covered: Amount,
}

impl Project {
    /// Fresh `Active` record with nothing minted or contributed.
    pub fn from_spec(owner: Identity, spec: ProjectSpec) -> Self {
        Self {
            owner,
            bounds: spec.bounds,
            area: spec.area,
            project_type: spec.project_type,
            status: ProjectStatus::Active,
            credits_minted: 0,
            insurance_covered: 0,
        }
    }
}
