//! Shared priority scale for persons and projects.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Three-level priority used by both persons and projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Direction in which priorities are ranked when sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityOrder {
    /// `LOW < MEDIUM < HIGH`.
    #[default]
    LowFirst,
    /// `HIGH < MEDIUM < LOW`.
    HighFirst,
}

impl Priority {
    /// Upper-case wire/display form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    /// Sort rank under the given ordering; lower ranks sort first.
    pub fn rank(self, order: PriorityOrder) -> u8 {
        let low_first = match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        };
        match order {
            PriorityOrder::LowFirst => low_first,
            PriorityOrder::HighFirst => 2 - low_first,
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when text does not name a priority level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePriorityError(pub String);

impl Display for ParsePriorityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "priority must be LOW/MEDIUM/HIGH, got `{}`", self.0)
    }
}

impl Error for ParsePriorityError {}

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            _ => Err(ParsePriorityError(value.to_string())),
        }
    }
}
