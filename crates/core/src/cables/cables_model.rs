use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::tension::TensionLevel;

/// A conductor type. `unit_price` is per meter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cable {
    pub id: String,
    pub company_id: String,
    pub code: String,
    pub description: String,
    pub tension_level: TensionLevel,
    pub section_mm2: Decimal,
    pub unit_price: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCable {
    pub id: Option<String>,
    pub company_id: String,
    pub code: String,
    pub description: String,
    pub tension_level: TensionLevel,
    pub section_mm2: Decimal,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CableUpdate {
    pub id: String,
    pub code: String,
    pub description: String,
    pub tension_level: TensionLevel,
    pub section_mm2: Decimal,
    pub unit_price: Decimal,
}
