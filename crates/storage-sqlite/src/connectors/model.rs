use chrono::NaiveDateTime;
use diesel::prelude::*;

use gridbudget_core::connectors::{Connector, NewConnector};
use gridbudget_core::errors::Error;

use crate::utils::{new_id, now, parse_decimal};

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::connectors)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ConnectorDB {
    pub id: String,
    pub company_id: String,
    pub code: String,
    pub description: String,
    pub unit_price: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<ConnectorDB> for Connector {
    type Error = Error;

    fn try_from(db: ConnectorDB) -> Result<Self, Self::Error> {
        Ok(Self {
            unit_price: parse_decimal(&db.unit_price, "connectors.unit_price")?,
            id: db.id,
            company_id: db.company_id,
            code: db.code,
            description: db.description,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewConnector> for ConnectorDB {
    fn from(domain: NewConnector) -> Self {
        let now = now();
        Self {
            id: new_id(domain.id),
            company_id: domain.company_id,
            code: domain.code,
            description: domain.description,
            unit_price: domain.unit_price.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
