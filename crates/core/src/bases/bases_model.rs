//! Base domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An operational base (field office) of a company.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Base {
    pub id: String,
    pub company_id: String,
    pub name: String,
    pub city: String,
    /// Two-letter region code.
    pub state: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBase {
    pub id: Option<String>,
    pub company_id: String,
    pub name: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseUpdate {
    pub id: String,
    pub name: String,
    pub city: String,
    pub state: String,
}
