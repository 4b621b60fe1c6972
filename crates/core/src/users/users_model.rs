//! User domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Access role of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Platform operator, not bound to a single company.
    Admin,
    CompanyAdmin,
    BaseManager,
    Technician,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::CompanyAdmin => "COMPANY_ADMIN",
            Role::BaseManager => "BASE_MANAGER",
            Role::Technician => "TECHNICIAN",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Role::Admin => 4,
            Role::CompanyAdmin => 3,
            Role::BaseManager => 2,
            Role::Technician => 1,
        }
    }

    /// Whether the role may create and edit catalog entries.
    pub fn can_manage_catalog(&self) -> bool {
        matches!(self, Role::Admin | Role::CompanyAdmin)
    }

    /// Whether a holder of this role may grant or revoke `other`.
    pub fn can_assign(&self, other: Role) -> bool {
        *self == Role::Admin || self.rank() > other.rank()
    }

    /// Roles working out of a single base must be attached to one.
    pub fn requires_base(&self) -> bool {
        matches!(self, Role::BaseManager | Role::Technician)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "COMPANY_ADMIN" => Ok(Role::CompanyAdmin),
            "BASE_MANAGER" => Ok(Role::BaseManager),
            "TECHNICIAN" => Ok(Role::Technician),
            other => Err(ValidationError::InvalidInput(format!("Unknown role '{}'", other)).into()),
        }
    }
}

/// Domain model representing a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub company_id: String,
    pub base_id: Option<String>,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Object-storage key or URL of the avatar image.
    pub avatar_url: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub id: Option<String>,
    pub company_id: String,
    pub base_id: Option<String>,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Profile update. Role and avatar have dedicated operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub id: String,
    pub base_id: Option<String>,
    pub name: String,
    pub email: String,
    pub is_active: bool,
}

/// Trims and lower-cases an email address after a structural check.
pub fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    let mut parts = email.split('@');
    let valid = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace)
        }
        _ => false,
    };
    if !valid {
        return Err(
            ValidationError::InvalidInput(format!("Invalid email address '{}'", email)).into(),
        );
    }
    Ok(email)
}
