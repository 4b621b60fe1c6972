//! Company repository and service traits.

use async_trait::async_trait;

use super::companies_model::{Company, CompanyUpdate, NewCompany};
use crate::errors::Result;

/// Trait defining the contract for Company repository operations.
#[async_trait]
pub trait CompanyRepositoryTrait: Send + Sync {
    async fn create(&self, new_company: NewCompany) -> Result<Company>;
    async fn update(&self, company_update: CompanyUpdate) -> Result<Company>;
    /// Deletes a company by its ID. Returns the number of deleted records.
    async fn delete(&self, company_id: &str) -> Result<usize>;
    fn get_by_id(&self, company_id: &str) -> Result<Company>;
    fn find_by_document(&self, document: &str) -> Result<Option<Company>>;
    fn list(&self) -> Result<Vec<Company>>;
}

/// Trait defining the contract for Company service operations.
#[async_trait]
pub trait CompanyServiceTrait: Send + Sync {
    async fn create_company(&self, new_company: NewCompany) -> Result<Company>;
    async fn update_company(&self, company_update: CompanyUpdate) -> Result<Company>;
    async fn delete_company(&self, company_id: &str) -> Result<()>;
    fn get_company(&self, company_id: &str) -> Result<Company>;
    fn list_companies(&self) -> Result<Vec<Company>>;
}
