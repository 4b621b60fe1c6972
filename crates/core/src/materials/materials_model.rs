//! Material domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog material with its unit of measure and unit price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: String,
    pub company_id: String,
    pub code: String,
    pub description: String,
    /// Unit of measure, e.g. `UN`, `M`, `KG`.
    pub unit: String,
    pub unit_price: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Material {
    /// Case-insensitive substring match over code and description.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.code.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMaterial {
    pub id: Option<String>,
    pub company_id: String,
    pub code: String,
    pub description: String,
    pub unit: String,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialUpdate {
    pub id: String,
    pub code: String,
    pub description: String,
    pub unit: String,
    pub unit_price: Decimal,
}
