use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use gridbudget_core::pole_screws::{
    NewPoleScrew, PoleScrew, PoleScrewRepositoryTrait, PoleScrewUpdate,
};
use gridbudget_core::Result;

use super::model::PoleScrewDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::pole_screws;
use crate::utils::now;

pub struct PoleScrewRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PoleScrewRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl PoleScrewRepositoryTrait for PoleScrewRepository {
    async fn create(&self, new_pole_screw: NewPoleScrew) -> Result<PoleScrew> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<PoleScrew> {
                let row: PoleScrewDB = new_pole_screw.into();
                diesel::insert_into(pole_screws::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                PoleScrew::try_from(row)
            })
            .await
    }

    async fn update(&self, pole_screw_update: PoleScrewUpdate) -> Result<PoleScrew> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<PoleScrew> {
                let existing = pole_screws::table
                    .find(&pole_screw_update.id)
                    .select(PoleScrewDB::as_select())
                    .first::<PoleScrewDB>(conn)
                    .map_err(StorageError::from)?;

                let row = PoleScrewDB {
                    code: pole_screw_update.code,
                    description: pole_screw_update.description,
                    length_mm: pole_screw_update.length_mm,
                    unit_price: pole_screw_update.unit_price.to_string(),
                    updated_at: now(),
                    ..existing
                };
                diesel::update(pole_screws::table.find(&row.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                PoleScrew::try_from(row)
            })
            .await
    }

    async fn delete(&self, pole_screw_id: &str) -> Result<usize> {
        let pole_screw_id = pole_screw_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(pole_screws::table.find(pole_screw_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    fn get_by_id(&self, pole_screw_id: &str) -> Result<PoleScrew> {
        let mut conn = get_connection(&self.pool)?;
        let row = pole_screws::table
            .find(pole_screw_id)
            .select(PoleScrewDB::as_select())
            .first::<PoleScrewDB>(&mut conn)
            .map_err(StorageError::from)?;
        PoleScrew::try_from(row)
    }

    fn find_by_code(&self, company_id: &str, code: &str) -> Result<Option<PoleScrew>> {
        let mut conn = get_connection(&self.pool)?;
        pole_screws::table
            .filter(pole_screws::company_id.eq(company_id))
            .filter(pole_screws::code.eq(code))
            .select(PoleScrewDB::as_select())
            .first::<PoleScrewDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(PoleScrew::try_from)
            .transpose()
    }

    /// Shortest first so callers can scan for the first screw that fits.
    fn list_by_company(&self, company_id: &str) -> Result<Vec<PoleScrew>> {
        let mut conn = get_connection(&self.pool)?;
        pole_screws::table
            .filter(pole_screws::company_id.eq(company_id))
            .select(PoleScrewDB::as_select())
            .order((pole_screws::length_mm.asc(), pole_screws::code.asc()))
            .load::<PoleScrewDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(PoleScrew::try_from)
            .collect()
    }
}
