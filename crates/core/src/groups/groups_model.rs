//! Group domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::tension::TensionLevel;

/// What a group item points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupItemKind {
    Material,
    Connector,
    /// Sized from the point's utility pole at calculation time.
    PoleScrew,
}

impl GroupItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupItemKind::Material => "MATERIAL",
            GroupItemKind::Connector => "CONNECTOR",
            GroupItemKind::PoleScrew => "POLE_SCREW",
        }
    }

    /// Whether items of this kind must name a catalog entry.
    pub fn requires_reference(&self) -> bool {
        !matches!(self, GroupItemKind::PoleScrew)
    }
}

impl fmt::Display for GroupItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupItemKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "MATERIAL" => Ok(GroupItemKind::Material),
            "CONNECTOR" => Ok(GroupItemKind::Connector),
            "POLE_SCREW" => Ok(GroupItemKind::PoleScrew),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown group item kind '{}'",
                other
            ))
            .into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupItem {
    pub id: String,
    pub group_id: String,
    pub kind: GroupItemKind,
    pub reference_id: Option<String>,
    pub quantity: Decimal,
    pub scales_with_phases: bool,
}

impl GroupItem {
    /// Quantity contributed at a point whose tension level runs `phases` phases.
    /// `None` when scaling overflows the decimal range.
    pub fn effective_quantity(&self, phases: i32) -> Option<Decimal> {
        if self.scales_with_phases {
            self.quantity.checked_mul(Decimal::from(phases))
        } else {
            Some(self.quantity)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub company_id: String,
    pub code: String,
    pub name: String,
    pub tension_level: TensionLevel,
    pub items: Vec<GroupItem>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGroupItem {
    pub kind: GroupItemKind,
    pub reference_id: Option<String>,
    pub quantity: Decimal,
    #[serde(default)]
    pub scales_with_phases: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGroup {
    pub id: Option<String>,
    pub company_id: String,
    pub code: String,
    pub name: String,
    pub tension_level: TensionLevel,
    pub items: Vec<NewGroupItem>,
}

/// Full replacement of a group's header and items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupUpdate {
    pub id: String,
    pub code: String,
    pub name: String,
    pub tension_level: TensionLevel,
    pub items: Vec<NewGroupItem>,
}
