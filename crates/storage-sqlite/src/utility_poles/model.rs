use chrono::NaiveDateTime;
use diesel::prelude::*;

use gridbudget_core::errors::Error;
use gridbudget_core::utility_poles::{NewUtilityPole, UtilityPole};

use crate::utils::{new_id, now, parse_decimal};

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::utility_poles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UtilityPoleDB {
    pub id: String,
    pub company_id: String,
    pub code: String,
    pub description: String,
    pub height_m: String,
    pub strength_dan: i32,
    pub min_screw_length_mm: i32,
    pub unit_price: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<UtilityPoleDB> for UtilityPole {
    type Error = Error;

    fn try_from(db: UtilityPoleDB) -> Result<Self, Self::Error> {
        Ok(Self {
            height_m: parse_decimal(&db.height_m, "utility_poles.height_m")?,
            unit_price: parse_decimal(&db.unit_price, "utility_poles.unit_price")?,
            id: db.id,
            company_id: db.company_id,
            code: db.code,
            description: db.description,
            strength_dan: db.strength_dan,
            min_screw_length_mm: db.min_screw_length_mm,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewUtilityPole> for UtilityPoleDB {
    fn from(domain: NewUtilityPole) -> Self {
        let now = now();
        Self {
            id: new_id(domain.id),
            company_id: domain.company_id,
            code: domain.code,
            description: domain.description,
            height_m: domain.height_m.to_string(),
            strength_dan: domain.strength_dan,
            min_screw_length_mm: domain.min_screw_length_mm,
            unit_price: domain.unit_price.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
