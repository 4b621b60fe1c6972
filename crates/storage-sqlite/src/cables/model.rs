use chrono::NaiveDateTime;
use diesel::prelude::*;

use gridbudget_core::cables::{Cable, NewCable};
use gridbudget_core::errors::Error;

use crate::utils::{new_id, now, parse_decimal, parse_enum};

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::cables)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CableDB {
    pub id: String,
    pub company_id: String,
    pub code: String,
    pub description: String,
    pub tension_level: String,
    pub section_mm2: String,
    pub unit_price: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<CableDB> for Cable {
    type Error = Error;

    fn try_from(db: CableDB) -> Result<Self, Self::Error> {
        Ok(Self {
            tension_level: parse_enum(&db.tension_level, "cables.tension_level")?,
            section_mm2: parse_decimal(&db.section_mm2, "cables.section_mm2")?,
            unit_price: parse_decimal(&db.unit_price, "cables.unit_price")?,
            id: db.id,
            company_id: db.company_id,
            code: db.code,
            description: db.description,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewCable> for CableDB {
    fn from(domain: NewCable) -> Self {
        let now = now();
        Self {
            id: new_id(domain.id),
            company_id: domain.company_id,
            code: domain.code,
            description: domain.description,
            tension_level: domain.tension_level.as_str().to_string(),
            section_mm2: domain.section_mm2.to_string(),
            unit_price: domain.unit_price.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
