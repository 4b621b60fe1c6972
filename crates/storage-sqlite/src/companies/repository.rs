use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use gridbudget_core::companies::{Company, CompanyRepositoryTrait, CompanyUpdate, NewCompany};
use gridbudget_core::Result;

use super::model::CompanyDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::companies;
use crate::utils::now;

pub struct CompanyRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CompanyRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl CompanyRepositoryTrait for CompanyRepository {
    async fn create(&self, new_company: NewCompany) -> Result<Company> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Company> {
                let row: CompanyDB = new_company.into();
                diesel::insert_into(companies::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(row.into())
            })
            .await
    }

    async fn update(&self, company_update: CompanyUpdate) -> Result<Company> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Company> {
                let existing = companies::table
                    .find(&company_update.id)
                    .select(CompanyDB::as_select())
                    .first::<CompanyDB>(conn)
                    .map_err(StorageError::from)?;

                let row = CompanyDB {
                    name: company_update.name,
                    document: company_update.document,
                    is_active: company_update.is_active,
                    updated_at: now(),
                    ..existing
                };
                diesel::update(companies::table.find(&row.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(row.into())
            })
            .await
    }

    async fn delete(&self, company_id: &str) -> Result<usize> {
        let company_id = company_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(companies::table.find(company_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    fn get_by_id(&self, company_id: &str) -> Result<Company> {
        let mut conn = get_connection(&self.pool)?;
        let row = companies::table
            .find(company_id)
            .select(CompanyDB::as_select())
            .first::<CompanyDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(row.into())
    }

    fn find_by_document(&self, document: &str) -> Result<Option<Company>> {
        let mut conn = get_connection(&self.pool)?;
        let row = companies::table
            .filter(companies::document.eq(document))
            .select(CompanyDB::as_select())
            .first::<CompanyDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Company::from))
    }

    fn list(&self) -> Result<Vec<Company>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = companies::table
            .select(CompanyDB::as_select())
            .order(companies::name.asc())
            .load::<CompanyDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Company::from).collect())
    }
}
