//! Engine configuration
//!
//! Defaults are the protocol constants. A deployment may override them from
//! a TOML file and from `CARBONFLOW_*` environment variables, in that order,
//! and the result is validated before an engine is built from it.

pub mod validation;

pub use validation::{ConfigValidator, ValidationError};

use crate::arithmetic::Amount;
use crate::errors::CarbonError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Prefix for environment overrides, e.g. `CARBONFLOW_RATE_WINDOW=20`.
pub const ENV_PREFIX: &str = "CARBONFLOW_";

/// Ticks in one rate-limit window.
pub const RATE_WINDOW: u64 = 10;
/// Gated actions allowed per identity per window.
pub const MAX_ACTIONS_PER_WINDOW: u32 = 5;
/// Ticks between initiating and completing an admin transfer.
pub const ADMIN_TIMELOCK: u64 = 144;
/// Total insurance above which the circuit breaker trips.
pub const CIRCUIT_THRESHOLD: u64 = 1_000_000_000_000;
/// Smallest registrable project area in square meters.
pub const MIN_PROJECT_SIZE: u64 = 1_000;
/// Projects one owner may hold.
pub const MAX_PROJECTS_PER_OWNER: u32 = 50;
/// Micro-credits minted per verified ton.
pub const MICRO_CREDITS_PER_TON: u64 = 1_000_000;
/// Entries accepted in one batch registration.
pub const MAX_BATCH_SIZE: u32 = 10;
/// Longest accepted project type label in bytes.
pub const MAX_PROJECT_TYPE_LEN: u32 = 32;

/// Configuration failures
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`EngineConfig`]
    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// Environment override could not be parsed
    #[error("Invalid value {value:?} for {key}")]
    Env { key: String, value: String },

    /// One or more fields failed validation
    #[error("Invalid configuration: {}", summarize(.0))]
    Invalid(Vec<ValidationError>),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<ConfigError> for CarbonError {
    fn from(_: ConfigError) -> Self {
        CarbonError::InvalidInput
    }
}

/// Tunable protocol parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Length of a rate-limit window in ticks
    pub rate_window: u64,
    /// Gated actions per identity per window
    pub max_actions_per_window: u32,
    /// Admin succession timelock in ticks
    pub admin_timelock: u64,
    /// Insurance total that trips the circuit breaker (strictly greater than)
    pub circuit_threshold: u64,
    /// Minimum project area in square meters
    pub min_project_size: u64,
    /// Maximum projects per owner
    pub max_projects_per_owner: u32,
    /// Micro-credits per verified ton
    pub micro_credits_per_ton: u64,
    /// Maximum entries per batch registration
    pub max_batch_size: u32,
    /// Maximum project type length in bytes
    pub max_project_type_len: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rate_window: RATE_WINDOW,
            max_actions_per_window: MAX_ACTIONS_PER_WINDOW,
            admin_timelock: ADMIN_TIMELOCK,
            circuit_threshold: CIRCUIT_THRESHOLD,
            min_project_size: MIN_PROJECT_SIZE,
            max_projects_per_owner: MAX_PROJECTS_PER_OWNER,
            micro_credits_per_ton: MICRO_CREDITS_PER_TON,
            max_batch_size: MAX_BATCH_SIZE,
            max_project_type_len: MAX_PROJECT_TYPE_LEN,
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document; absent fields keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a TOML config file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Apply `CARBONFLOW_*` overrides from the process environment.
    pub fn merge_with_env(&mut self) -> Result<(), ConfigError> {
        self.merge_from_vars(std::env::vars())
    }

    /// Apply `CARBONFLOW_*` overrides from an explicit set of variables.
    ///
    /// Unknown keys under the prefix are ignored.
    pub fn merge_from_vars<I, K, V>(&mut self, vars: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            let (key, value) = (key.as_ref(), value.as_ref());
            let Some(field) = key.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let applied = match field.to_ascii_lowercase().as_str() {
                "rate_window" => parse_into(&mut self.rate_window, value),
                "max_actions_per_window" => parse_into(&mut self.max_actions_per_window, value),
                "admin_timelock" => parse_into(&mut self.admin_timelock, value),
                "circuit_threshold" => parse_into(&mut self.circuit_threshold, value),
                "min_project_size" => parse_into(&mut self.min_project_size, value),
                "max_projects_per_owner" => parse_into(&mut self.max_projects_per_owner, value),
                "micro_credits_per_ton" => parse_into(&mut self.micro_credits_per_ton, value),
                "max_batch_size" => parse_into(&mut self.max_batch_size, value),
                "max_project_type_len" => parse_into(&mut self.max_project_type_len, value),
                _ => continue,
            };
            if !applied {
                return Err(ConfigError::Env {
                    key: key.to_string(),
                    value: value.to_string(),
                });
            }
            debug!(key, value, "config override from environment");
        }
        Ok(())
    }

    /// Validate every field, reporting all failures at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut validator = ConfigValidator::new();
        validator
            .positive("rate_window", self.rate_window)
            .positive("max_actions_per_window", self.max_actions_per_window)
            .positive("max_projects_per_owner", self.max_projects_per_owner)
            .positive("micro_credits_per_ton", self.micro_credits_per_ton)
            .positive("max_batch_size", self.max_batch_size)
            .positive("max_project_type_len", self.max_project_type_len);
        validator.finish().map_err(ConfigError::Invalid)
    }

    /// Circuit breaker threshold as an amount.
    pub fn circuit_threshold_amount(&self) -> Amount {
        Amount::from(self.circuit_threshold)
    }

    /// Micro-credits per ton as an amount.
    pub fn credit_rate(&self) -> Amount {
        Amount::from(self.micro_credits_per_ton)
    }
}

fn parse_into<T: std::str::FromStr>(slot: &mut T, value: &str) -> bool {
    match value.trim().parse() {
        Ok(parsed) => {
            *slot = parsed;
            true
        }
        Err(_) => false,
    }
}
