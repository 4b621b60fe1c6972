use chrono::NaiveDateTime;
use diesel::prelude::*;

use gridbudget_core::bases::{Base, NewBase};

use crate::utils::{new_id, now};

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::bases)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BaseDB {
    pub id: String,
    pub company_id: String,
    pub name: String,
    pub city: String,
    pub state: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<BaseDB> for Base {
    fn from(db: BaseDB) -> Self {
        Self {
            id: db.id,
            company_id: db.company_id,
            name: db.name,
            city: db.city,
            state: db.state,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewBase> for BaseDB {
    fn from(domain: NewBase) -> Self {
        let now = now();
        Self {
            id: new_id(domain.id),
            company_id: domain.company_id,
            name: domain.name,
            city: domain.city,
            state: domain.state,
            created_at: now,
            updated_at: now,
        }
    }
}
