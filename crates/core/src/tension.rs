//! Tension (voltage) level shared by cables, groups and points.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};

/// Voltage class of a network element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TensionLevel {
    Low,
    Medium,
}

impl TensionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TensionLevel::Low => "LOW",
            TensionLevel::Medium => "MEDIUM",
        }
    }
}

impl fmt::Display for TensionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TensionLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(TensionLevel::Low),
            "MEDIUM" => Ok(TensionLevel::Medium),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown tension level '{}'",
                other
            ))
            .into()),
        }
    }
}
