use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use gridbudget_core::cables::{Cable, CableRepositoryTrait, CableUpdate, NewCable};
use gridbudget_core::{Result, TensionLevel};

use super::model::CableDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::cables;
use crate::utils::now;

pub struct CableRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CableRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl CableRepositoryTrait for CableRepository {
    async fn create(&self, new_cable: NewCable) -> Result<Cable> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Cable> {
                let row: CableDB = new_cable.into();
                diesel::insert_into(cables::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Cable::try_from(row)
            })
            .await
    }

    async fn update(&self, cable_update: CableUpdate) -> Result<Cable> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Cable> {
                let existing = cables::table
                    .find(&cable_update.id)
                    .select(CableDB::as_select())
                    .first::<CableDB>(conn)
                    .map_err(StorageError::from)?;

                let row = CableDB {
                    code: cable_update.code,
                    description: cable_update.description,
                    tension_level: cable_update.tension_level.as_str().to_string(),
                    section_mm2: cable_update.section_mm2.to_string(),
                    unit_price: cable_update.unit_price.to_string(),
                    updated_at: now(),
                    ..existing
                };
                diesel::update(cables::table.find(&row.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Cable::try_from(row)
            })
            .await
    }

    async fn delete(&self, cable_id: &str) -> Result<usize> {
        let cable_id = cable_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(cables::table.find(cable_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    fn get_by_id(&self, cable_id: &str) -> Result<Cable> {
        let mut conn = get_connection(&self.pool)?;
        let row = cables::table
            .find(cable_id)
            .select(CableDB::as_select())
            .first::<CableDB>(&mut conn)
            .map_err(StorageError::from)?;
        Cable::try_from(row)
    }

    fn find_by_code(&self, company_id: &str, code: &str) -> Result<Option<Cable>> {
        let mut conn = get_connection(&self.pool)?;
        cables::table
            .filter(cables::company_id.eq(company_id))
            .filter(cables::code.eq(code))
            .select(CableDB::as_select())
            .first::<CableDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(Cable::try_from)
            .transpose()
    }

    fn list_by_company(
        &self,
        company_id: &str,
        tension_level: Option<TensionLevel>,
    ) -> Result<Vec<Cable>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = cables::table
            .filter(cables::company_id.eq(company_id))
            .into_boxed();
        if let Some(level) = tension_level {
            query = query.filter(cables::tension_level.eq(level.as_str()));
        }
        query
            .select(CableDB::as_select())
            .order(cables::code.asc())
            .load::<CableDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(Cable::try_from)
            .collect()
    }
}
