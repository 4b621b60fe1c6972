//! Database model for companies.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use gridbudget_core::companies::{Company, NewCompany};

use crate::utils::{new_id, now};

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::companies)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CompanyDB {
    pub id: String,
    pub name: String,
    pub document: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<CompanyDB> for Company {
    fn from(db: CompanyDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            document: db.document,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewCompany> for CompanyDB {
    fn from(domain: NewCompany) -> Self {
        let now = now();
        Self {
            id: new_id(domain.id),
            name: domain.name,
            document: domain.document,
            is_active: domain.is_active,
            created_at: now,
            updated_at: now,
        }
    }
}
