use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use gridbudget_core::utility_poles::{
    NewUtilityPole, UtilityPole, UtilityPoleRepositoryTrait, UtilityPoleUpdate,
};
use gridbudget_core::Result;

use super::model::UtilityPoleDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::utility_poles;
use crate::utils::now;

pub struct UtilityPoleRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UtilityPoleRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl UtilityPoleRepositoryTrait for UtilityPoleRepository {
    async fn create(&self, new_pole: NewUtilityPole) -> Result<UtilityPole> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<UtilityPole> {
                let row: UtilityPoleDB = new_pole.into();
                diesel::insert_into(utility_poles::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                UtilityPole::try_from(row)
            })
            .await
    }

    async fn update(&self, pole_update: UtilityPoleUpdate) -> Result<UtilityPole> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<UtilityPole> {
                let existing = utility_poles::table
                    .find(&pole_update.id)
                    .select(UtilityPoleDB::as_select())
                    .first::<UtilityPoleDB>(conn)
                    .map_err(StorageError::from)?;

                let row = UtilityPoleDB {
                    code: pole_update.code,
                    description: pole_update.description,
                    height_m: pole_update.height_m.to_string(),
                    strength_dan: pole_update.strength_dan,
                    min_screw_length_mm: pole_update.min_screw_length_mm,
                    unit_price: pole_update.unit_price.to_string(),
                    updated_at: now(),
                    ..existing
                };
                diesel::update(utility_poles::table.find(&row.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                UtilityPole::try_from(row)
            })
            .await
    }

    async fn delete(&self, pole_id: &str) -> Result<usize> {
        let pole_id = pole_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(utility_poles::table.find(pole_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    fn get_by_id(&self, pole_id: &str) -> Result<UtilityPole> {
        let mut conn = get_connection(&self.pool)?;
        let row = utility_poles::table
            .find(pole_id)
            .select(UtilityPoleDB::as_select())
            .first::<UtilityPoleDB>(&mut conn)
            .map_err(StorageError::from)?;
        UtilityPole::try_from(row)
    }

    fn find_by_code(&self, company_id: &str, code: &str) -> Result<Option<UtilityPole>> {
        let mut conn = get_connection(&self.pool)?;
        utility_poles::table
            .filter(utility_poles::company_id.eq(company_id))
            .filter(utility_poles::code.eq(code))
            .select(UtilityPoleDB::as_select())
            .first::<UtilityPoleDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(UtilityPole::try_from)
            .transpose()
    }

    fn list_by_company(&self, company_id: &str) -> Result<Vec<UtilityPole>> {
        let mut conn = get_connection(&self.pool)?;
        utility_poles::table
            .filter(utility_poles::company_id.eq(company_id))
            .select(UtilityPoleDB::as_select())
            .order(utility_poles::code.asc())
            .load::<UtilityPoleDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(UtilityPole::try_from)
            .collect()
    }
}
