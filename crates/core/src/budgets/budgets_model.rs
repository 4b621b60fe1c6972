//! Budget domain models.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Category of a budget line. Declaration order is the presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetLineKind {
    UtilityPole,
    Cable,
    Connector,
    PoleScrew,
    Material,
}

impl BudgetLineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetLineKind::UtilityPole => "UTILITY_POLE",
            BudgetLineKind::Cable => "CABLE",
            BudgetLineKind::Connector => "CONNECTOR",
            BudgetLineKind::PoleScrew => "POLE_SCREW",
            BudgetLineKind::Material => "MATERIAL",
        }
    }
}

impl fmt::Display for BudgetLineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetLineKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "UTILITY_POLE" => Ok(BudgetLineKind::UtilityPole),
            "CABLE" => Ok(BudgetLineKind::Cable),
            "CONNECTOR" => Ok(BudgetLineKind::Connector),
            "POLE_SCREW" => Ok(BudgetLineKind::PoleScrew),
            "MATERIAL" => Ok(BudgetLineKind::Material),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown budget line kind '{}'",
                other
            ))
            .into()),
        }
    }
}

/// One aggregated row of the bill of materials.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLine {
    pub kind: BudgetLineKind,
    pub item_id: String,
    pub code: String,
    pub description: String,
    pub unit: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total: Decimal,
}

/// Result of a budget calculation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub project_id: String,
    pub lines: Vec<BudgetLine>,
    pub total: Decimal,
    pub point_count: i32,
    pub calculated_at: NaiveDateTime,
}

impl Budget {
    pub fn line(&self, kind: BudgetLineKind, item_id: &str) -> Option<&BudgetLine> {
        self.lines
            .iter()
            .find(|l| l.kind == kind && l.item_id == item_id)
    }

    pub fn subtotal(&self, kind: BudgetLineKind) -> Decimal {
        self.lines
            .iter()
            .filter(|l| l.kind == kind)
            .map(|l| l.total)
            .sum()
    }
}

/// A persisted budget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSnapshot {
    pub id: String,
    pub project_id: String,
    pub lines: Vec<BudgetLine>,
    pub total: Decimal,
    pub point_count: i32,
    pub calculated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLineDelta {
    pub kind: BudgetLineKind,
    pub item_id: String,
    pub code: String,
    pub description: String,
    pub base_quantity: Decimal,
    pub other_quantity: Decimal,
    pub quantity_delta: Decimal,
    pub base_total: Decimal,
    pub other_total: Decimal,
    pub total_delta: Decimal,
}

/// Line-by-line difference between two snapshots of one project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetComparison {
    pub project_id: String,
    pub base_budget_id: String,
    pub other_budget_id: String,
    pub lines: Vec<BudgetLineDelta>,
    pub total_delta: Decimal,
}

/// Pairs lines of two budgets by (kind, item) and reports every pair whose
/// quantity or total changed. Lines missing on one side count as zero. Code
/// and description come from the newer line, and deltas are ordered by kind
/// then code.
pub fn compare_lines(base: &[BudgetLine], other: &[BudgetLine]) -> Vec<BudgetLineDelta> {
    type Pair<'a> = (Option<&'a BudgetLine>, Option<&'a BudgetLine>);
    let mut paired: BTreeMap<(BudgetLineKind, &str), Pair<'_>> = BTreeMap::new();
    for line in base {
        paired.entry((line.kind, line.item_id.as_str())).or_default().0 = Some(line);
    }
    for line in other {
        paired.entry((line.kind, line.item_id.as_str())).or_default().1 = Some(line);
    }

    let mut deltas: Vec<BudgetLineDelta> = paired
        .into_values()
        .filter_map(|(base_line, other_line)| {
            let described = other_line.or(base_line)?;
            let base_quantity = base_line.map(|l| l.quantity).unwrap_or_default();
            let other_quantity = other_line.map(|l| l.quantity).unwrap_or_default();
            let base_total = base_line.map(|l| l.total).unwrap_or_default();
            let other_total = other_line.map(|l| l.total).unwrap_or_default();
            if base_quantity == other_quantity && base_total == other_total {
                return None;
            }
            Some(BudgetLineDelta {
                kind: described.kind,
                item_id: described.item_id.clone(),
                code: described.code.clone(),
                description: described.description.clone(),
                base_quantity,
                other_quantity,
                quantity_delta: other_quantity - base_quantity,
                base_total,
                other_total,
                total_delta: other_total - base_total,
            })
        })
        .collect();
    deltas.sort_by(|a, b| {
        a.kind
            .cmp(&b.kind)
            .then_with(|| a.code.cmp(&b.code))
            .then_with(|| a.item_id.cmp(&b.item_id))
    });
    deltas
}
