use async_trait::async_trait;

use super::materials_model::{Material, MaterialUpdate, NewMaterial};
use crate::errors::Result;

/// Trait for material repository operations
#[async_trait]
pub trait MaterialRepositoryTrait: Send + Sync {
    async fn create(&self, new_material: NewMaterial) -> Result<Material>;
    async fn update(&self, material_update: MaterialUpdate) -> Result<Material>;
    async fn delete(&self, material_id: &str) -> Result<usize>;
    fn get_by_id(&self, material_id: &str) -> Result<Material>;
    fn find_by_code(&self, company_id: &str, code: &str) -> Result<Option<Material>>;
    /// Ordered by code.
    fn list_by_company(&self, company_id: &str) -> Result<Vec<Material>>;
}

/// Trait for material service operations
#[async_trait]
pub trait MaterialServiceTrait: Send + Sync {
    async fn create_material(&self, new_material: NewMaterial) -> Result<Material>;
    async fn update_material(&self, material_update: MaterialUpdate) -> Result<Material>;
    async fn delete_material(&self, material_id: &str) -> Result<()>;
    fn get_material(&self, material_id: &str) -> Result<Material>;
    fn list_materials(&self, company_id: &str) -> Result<Vec<Material>>;
    fn search_materials(&self, company_id: &str, query: &str) -> Result<Vec<Material>>;
}
