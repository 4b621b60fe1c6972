use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use gridbudget_core::bases::{Base, BaseRepositoryTrait, BaseUpdate, NewBase};
use gridbudget_core::Result;

use super::model::BaseDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::bases;
use crate::utils::now;

pub struct BaseRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BaseRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl BaseRepositoryTrait for BaseRepository {
    async fn create(&self, new_base: NewBase) -> Result<Base> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Base> {
                let row: BaseDB = new_base.into();
                diesel::insert_into(bases::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(row.into())
            })
            .await
    }

    async fn update(&self, base_update: BaseUpdate) -> Result<Base> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Base> {
                let existing = bases::table
                    .find(&base_update.id)
                    .select(BaseDB::as_select())
                    .first::<BaseDB>(conn)
                    .map_err(StorageError::from)?;

                let row = BaseDB {
                    name: base_update.name,
                    city: base_update.city,
                    state: base_update.state,
                    updated_at: now(),
                    ..existing
                };
                diesel::update(bases::table.find(&row.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(row.into())
            })
            .await
    }

    async fn delete(&self, base_id: &str) -> Result<usize> {
        let base_id = base_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(bases::table.find(base_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    fn get_by_id(&self, base_id: &str) -> Result<Base> {
        let mut conn = get_connection(&self.pool)?;
        let row = bases::table
            .find(base_id)
            .select(BaseDB::as_select())
            .first::<BaseDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(row.into())
    }

    fn list_by_company(&self, company_id: &str) -> Result<Vec<Base>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = bases::table
            .filter(bases::company_id.eq(company_id))
            .select(BaseDB::as_select())
            .order(bases::name.asc())
            .load::<BaseDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Base::from).collect())
    }
}
