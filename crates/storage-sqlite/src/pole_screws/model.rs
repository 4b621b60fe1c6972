use chrono::NaiveDateTime;
use diesel::prelude::*;

use gridbudget_core::errors::Error;
use gridbudget_core::pole_screws::{NewPoleScrew, PoleScrew};

use crate::utils::{new_id, now, parse_decimal};

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::pole_screws)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PoleScrewDB {
    pub id: String,
    pub company_id: String,
    pub code: String,
    pub description: String,
    pub length_mm: i32,
    pub unit_price: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<PoleScrewDB> for PoleScrew {
    type Error = Error;

    fn try_from(db: PoleScrewDB) -> Result<Self, Self::Error> {
        Ok(Self {
            unit_price: parse_decimal(&db.unit_price, "pole_screws.unit_price")?,
            id: db.id,
            company_id: db.company_id,
            code: db.code,
            description: db.description,
            length_mm: db.length_mm,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewPoleScrew> for PoleScrewDB {
    fn from(domain: NewPoleScrew) -> Self {
        let now = now();
        Self {
            id: new_id(domain.id),
            company_id: domain.company_id,
            code: domain.code,
            description: domain.description,
            length_mm: domain.length_mm,
            unit_price: domain.unit_price.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
