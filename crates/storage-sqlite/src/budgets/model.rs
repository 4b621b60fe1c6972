use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use gridbudget_core::budgets::{BudgetLine, BudgetLineKind, BudgetSnapshot};
use gridbudget_core::errors::Error;

use crate::errors::IntoCore;
use crate::utils::parse_decimal;

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetDB {
    pub id: String,
    pub project_id: String,
    /// Per-project counter; orders snapshots saved within the same second.
    pub revision: i32,
    /// JSON array of [`BudgetLineRecord`].
    pub lines: String,
    pub total: String,
    pub point_count: i32,
    pub calculated_at: NaiveDateTime,
}

/// Stored form of a budget line. Decimals are written as strings so the
/// JSON never goes through a float.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLineRecord {
    pub kind: BudgetLineKind,
    pub item_id: String,
    pub code: String,
    pub description: String,
    pub unit: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
}

impl From<&BudgetLine> for BudgetLineRecord {
    fn from(line: &BudgetLine) -> Self {
        Self {
            kind: line.kind,
            item_id: line.item_id.clone(),
            code: line.code.clone(),
            description: line.description.clone(),
            unit: line.unit.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            total: line.total,
        }
    }
}

impl From<BudgetLineRecord> for BudgetLine {
    fn from(record: BudgetLineRecord) -> Self {
        Self {
            kind: record.kind,
            item_id: record.item_id,
            code: record.code,
            description: record.description,
            unit: record.unit,
            quantity: record.quantity,
            unit_price: record.unit_price,
            total: record.total,
        }
    }
}

pub fn encode_lines(lines: &[BudgetLine]) -> Result<String, Error> {
    let records: Vec<BudgetLineRecord> = lines.iter().map(BudgetLineRecord::from).collect();
    serde_json::to_string(&records).into_core()
}

impl TryFrom<BudgetDB> for BudgetSnapshot {
    type Error = Error;

    fn try_from(db: BudgetDB) -> Result<Self, Self::Error> {
        let records: Vec<BudgetLineRecord> = serde_json::from_str(&db.lines).into_core()?;
        Ok(Self {
            total: parse_decimal(&db.total, "budgets.total")?,
            lines: records.into_iter().map(BudgetLine::from).collect(),
            id: db.id,
            project_id: db.project_id,
            point_count: db.point_count,
            calculated_at: db.calculated_at,
        })
    }
}
