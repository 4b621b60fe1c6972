use async_trait::async_trait;

use super::bases_model::{Base, BaseUpdate, NewBase};
use crate::errors::Result;

/// Trait for base repository operations
#[async_trait]
pub trait BaseRepositoryTrait: Send + Sync {
    async fn create(&self, new_base: NewBase) -> Result<Base>;
    async fn update(&self, base_update: BaseUpdate) -> Result<Base>;
    async fn delete(&self, base_id: &str) -> Result<usize>;
    fn get_by_id(&self, base_id: &str) -> Result<Base>;
    fn list_by_company(&self, company_id: &str) -> Result<Vec<Base>>;
}

/// Trait for base service operations
#[async_trait]
pub trait BaseServiceTrait: Send + Sync {
    async fn create_base(&self, new_base: NewBase) -> Result<Base>;
    async fn update_base(&self, base_update: BaseUpdate) -> Result<Base>;
    async fn delete_base(&self, base_id: &str) -> Result<()>;
    fn get_base(&self, base_id: &str) -> Result<Base>;
    fn list_bases(&self, company_id: &str) -> Result<Vec<Base>>;
}
