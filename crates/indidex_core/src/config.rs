//! Host-tunable core settings.
//!
//! # Responsibility
//! - Carry the limits and orderings the command pipeline reads at runtime.
//! - Parse host-provided JSON, filling absent keys with defaults.
//!
//! # Invariants
//! - `max_project_name_len` is at least 1.

use crate::model::priority::PriorityOrder;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

const DEFAULT_MAX_PROJECT_NAME_LEN: usize = 35;
const DEFAULT_DUE_SOON_DAYS: u32 = 7;

/// Core configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Longest accepted project name, in characters.
    pub max_project_name_len: usize,
    /// Inclusive window, in days from today, for the due-soon listing.
    pub due_soon_days: u32,
    /// Rank direction for priority sorting.
    pub priority_order: PriorityOrder,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            max_project_name_len: DEFAULT_MAX_PROJECT_NAME_LEN,
            due_soon_days: DEFAULT_DUE_SOON_DAYS,
            priority_order: PriorityOrder::default(),
        }
    }
}

/// Errors from loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read config: {err}"),
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl CoreConfig {
    /// Parses JSON; absent keys keep their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON file; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_project_name_len == 0 {
            return Err(ConfigError::Invalid(
                "max_project_name_len must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
