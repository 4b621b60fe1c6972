use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A utility pole model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UtilityPole {
    pub id: String,
    pub company_id: String,
    pub code: String,
    pub description: String,
    pub height_m: Decimal,
    /// Nominal strength in daN.
    pub strength_dan: i32,
    /// Shortest pole screw that goes through this pole at fitting height.
    pub min_screw_length_mm: i32,
    pub unit_price: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUtilityPole {
    pub id: Option<String>,
    pub company_id: String,
    pub code: String,
    pub description: String,
    pub height_m: Decimal,
    pub strength_dan: i32,
    pub min_screw_length_mm: i32,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilityPoleUpdate {
    pub id: String,
    pub code: String,
    pub description: String,
    pub height_m: Decimal,
    pub strength_dan: i32,
    pub min_screw_length_mm: i32,
    pub unit_price: Decimal,
}
