//! Project domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::tension::TensionLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    #[default]
    Draft,
    /// At least one budget snapshot has been saved.
    Budgeted,
    /// Read-only; points can no longer change.
    Archived,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "DRAFT",
            ProjectStatus::Budgeted => "BUDGETED",
            ProjectStatus::Archived => "ARCHIVED",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "DRAFT" => Ok(ProjectStatus::Draft),
            "BUDGETED" => Ok(ProjectStatus::Budgeted),
            "ARCHIVED" => Ok(ProjectStatus::Archived),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown project status '{}'",
                other
            ))
            .into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub company_id: String,
    pub base_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub city: String,
    pub medium_tension_phases: i32,
    pub low_tension_phases: i32,
    pub status: ProjectStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Project {
    /// Number of phases the project runs at a tension level.
    pub fn phases(&self, tension_level: TensionLevel) -> i32 {
        match tension_level {
            TensionLevel::Medium => self.medium_tension_phases,
            TensionLevel::Low => self.low_tension_phases,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub id: Option<String>,
    pub company_id: String,
    pub base_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub city: String,
    pub medium_tension_phases: i32,
    pub low_tension_phases: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    pub id: String,
    pub base_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub city: String,
    pub medium_tension_phases: i32,
    pub low_tension_phases: i32,
}
