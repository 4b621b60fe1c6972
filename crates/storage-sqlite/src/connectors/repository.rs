use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use gridbudget_core::connectors::{Connector, ConnectorRepositoryTrait, ConnectorUpdate, NewConnector};
use gridbudget_core::Result;

use super::model::ConnectorDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::connectors;
use crate::utils::now;

pub struct ConnectorRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ConnectorRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ConnectorRepositoryTrait for ConnectorRepository {
    async fn create(&self, new_connector: NewConnector) -> Result<Connector> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Connector> {
                let row: ConnectorDB = new_connector.into();
                diesel::insert_into(connectors::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Connector::try_from(row)
            })
            .await
    }

    async fn update(&self, connector_update: ConnectorUpdate) -> Result<Connector> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Connector> {
                let existing = connectors::table
                    .find(&connector_update.id)
                    .select(ConnectorDB::as_select())
                    .first::<ConnectorDB>(conn)
                    .map_err(StorageError::from)?;

                let row = ConnectorDB {
                    code: connector_update.code,
                    description: connector_update.description,
                    unit_price: connector_update.unit_price.to_string(),
                    updated_at: now(),
                    ..existing
                };
                diesel::update(connectors::table.find(&row.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Connector::try_from(row)
            })
            .await
    }

    async fn delete(&self, connector_id: &str) -> Result<usize> {
        let connector_id = connector_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(connectors::table.find(connector_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    fn get_by_id(&self, connector_id: &str) -> Result<Connector> {
        let mut conn = get_connection(&self.pool)?;
        let row = connectors::table
            .find(connector_id)
            .select(ConnectorDB::as_select())
            .first::<ConnectorDB>(&mut conn)
            .map_err(StorageError::from)?;
        Connector::try_from(row)
    }

    fn find_by_code(&self, company_id: &str, code: &str) -> Result<Option<Connector>> {
        let mut conn = get_connection(&self.pool)?;
        connectors::table
            .filter(connectors::company_id.eq(company_id))
            .filter(connectors::code.eq(code))
            .select(ConnectorDB::as_select())
            .first::<ConnectorDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(Connector::try_from)
            .transpose()
    }

    fn list_by_company(&self, company_id: &str) -> Result<Vec<Connector>> {
        let mut conn = get_connection(&self.pool)?;
        connectors::table
            .filter(connectors::company_id.eq(company_id))
            .select(ConnectorDB::as_select())
            .order(connectors::code.asc())
            .load::<ConnectorDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(Connector::try_from)
            .collect()
    }
}
