//! Company domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Domain model representing a company (tenant).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    /// Tax registration number, digits only.
    pub document: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new company.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub id: Option<String>,
    pub name: String,
    pub document: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Input model for updating a company.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyUpdate {
    pub id: String,
    pub name: String,
    pub document: String,
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Strips punctuation from a tax registration number.
///
/// Accepts the usual `00.000.000/0000-00` formatting; any character other
/// than digits and the separators `.`, `/`, `-` and spaces is rejected.
pub fn normalize_document(document: &str) -> Result<String> {
    let mut digits = String::with_capacity(document.len());
    for c in document.trim().chars() {
        match c {
            '0'..='9' => digits.push(c),
            '.' | '/' | '-' | ' ' => {}
            other => {
                return Err(ValidationError::InvalidInput(format!(
                    "Document contains invalid character '{}'",
                    other
                ))
                .into())
            }
        }
    }
    if digits.is_empty() {
        return Err(ValidationError::MissingField("document".to_string()).into());
    }
    Ok(digits)
}
