//! Point domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::tension::TensionLevel;

/// A station along the network: a pole position with the structures
/// mounted on it and the conductors arriving from the previous point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    pub id: String,
    pub project_id: String,
    pub sequence: i32,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Conductor length from the previous point, in meters.
    pub span_length_m: Decimal,
    pub utility_pole_id: Option<String>,
    pub medium_tension_group_id: Option<String>,
    pub low_tension_group_id: Option<String>,
    pub medium_tension_cable_id: Option<String>,
    pub low_tension_cable_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Point {
    pub fn group_id(&self, tension_level: TensionLevel) -> Option<&str> {
        match tension_level {
            TensionLevel::Medium => self.medium_tension_group_id.as_deref(),
            TensionLevel::Low => self.low_tension_group_id.as_deref(),
        }
    }

    pub fn cable_id(&self, tension_level: TensionLevel) -> Option<&str> {
        match tension_level {
            TensionLevel::Medium => self.medium_tension_cable_id.as_deref(),
            TensionLevel::Low => self.low_tension_cable_id.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewPoint {
    pub id: Option<String>,
    pub project_id: String,
    /// Appended after the last point when omitted.
    pub sequence: Option<i32>,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub span_length_m: Decimal,
    pub utility_pole_id: Option<String>,
    pub medium_tension_group_id: Option<String>,
    pub low_tension_group_id: Option<String>,
    pub medium_tension_cable_id: Option<String>,
    pub low_tension_cable_id: Option<String>,
}

/// Point update. Sequence changes go through reordering.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PointUpdate {
    pub id: String,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub span_length_m: Decimal,
    pub utility_pole_id: Option<String>,
    pub medium_tension_group_id: Option<String>,
    pub low_tension_group_id: Option<String>,
    pub medium_tension_cable_id: Option<String>,
    pub low_tension_cable_id: Option<String>,
}
