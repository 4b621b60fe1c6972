//! Database model for catalog materials.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use gridbudget_core::errors::Error;
use gridbudget_core::materials::{Material, NewMaterial};

use crate::utils::{new_id, now, parse_decimal};

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::materials)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MaterialDB {
    pub id: String,
    pub company_id: String,
    pub code: String,
    pub description: String,
    pub unit: String,
    pub unit_price: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<MaterialDB> for Material {
    type Error = Error;

    fn try_from(db: MaterialDB) -> Result<Self, Self::Error> {
        Ok(Self {
            unit_price: parse_decimal(&db.unit_price, "materials.unit_price")?,
            id: db.id,
            company_id: db.company_id,
            code: db.code,
            description: db.description,
            unit: db.unit,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewMaterial> for MaterialDB {
    fn from(domain: NewMaterial) -> Self {
        let now = now();
        Self {
            id: new_id(domain.id),
            company_id: domain.company_id,
            code: domain.code,
            description: domain.description,
            unit: domain.unit,
            unit_price: domain.unit_price.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
