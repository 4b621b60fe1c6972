use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use gridbudget_core::materials::{Material, MaterialRepositoryTrait, MaterialUpdate, NewMaterial};
use gridbudget_core::Result;

use super::model::MaterialDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::materials;
use crate::utils::now;

pub struct MaterialRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl MaterialRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl MaterialRepositoryTrait for MaterialRepository {
    async fn create(&self, new_material: NewMaterial) -> Result<Material> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Material> {
                let row: MaterialDB = new_material.into();
                diesel::insert_into(materials::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Material::try_from(row)
            })
            .await
    }

    async fn update(&self, material_update: MaterialUpdate) -> Result<Material> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Material> {
                let existing = materials::table
                    .find(&material_update.id)
                    .select(MaterialDB::as_select())
                    .first::<MaterialDB>(conn)
                    .map_err(StorageError::from)?;

                let row = MaterialDB {
                    code: material_update.code,
                    description: material_update.description,
                    unit: material_update.unit,
                    unit_price: material_update.unit_price.to_string(),
                    updated_at: now(),
                    ..existing
                };
                diesel::update(materials::table.find(&row.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Material::try_from(row)
            })
            .await
    }

    async fn delete(&self, material_id: &str) -> Result<usize> {
        let material_id = material_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(materials::table.find(material_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    fn get_by_id(&self, material_id: &str) -> Result<Material> {
        let mut conn = get_connection(&self.pool)?;
        let row = materials::table
            .find(material_id)
            .select(MaterialDB::as_select())
            .first::<MaterialDB>(&mut conn)
            .map_err(StorageError::from)?;
        Material::try_from(row)
    }

    fn find_by_code(&self, company_id: &str, code: &str) -> Result<Option<Material>> {
        let mut conn = get_connection(&self.pool)?;
        materials::table
            .filter(materials::company_id.eq(company_id))
            .filter(materials::code.eq(code))
            .select(MaterialDB::as_select())
            .first::<MaterialDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(Material::try_from)
            .transpose()
    }

    fn list_by_company(&self, company_id: &str) -> Result<Vec<Material>> {
        let mut conn = get_connection(&self.pool)?;
        materials::table
            .filter(materials::company_id.eq(company_id))
            .select(MaterialDB::as_select())
            .order(materials::code.asc())
            .load::<MaterialDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(Material::try_from)
            .collect()
    }
}
