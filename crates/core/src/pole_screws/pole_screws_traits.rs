use async_trait::async_trait;

use super::pole_screws_model::{NewPoleScrew, PoleScrew, PoleScrewUpdate};
use crate::errors::Result;

#[async_trait]
pub trait PoleScrewRepositoryTrait: Send + Sync {
    async fn create(&self, new_pole_screw: NewPoleScrew) -> Result<PoleScrew>;
    async fn update(&self, pole_screw_update: PoleScrewUpdate) -> Result<PoleScrew>;
    async fn delete(&self, pole_screw_id: &str) -> Result<usize>;
    fn get_by_id(&self, pole_screw_id: &str) -> Result<PoleScrew>;
    fn find_by_code(&self, company_id: &str, code: &str) -> Result<Option<PoleScrew>>;
    /// Ordered by length ascending, then code.
    fn list_by_company(&self, company_id: &str) -> Result<Vec<PoleScrew>>;
}

#[async_trait]
pub trait PoleScrewServiceTrait: Send + Sync {
    async fn create_pole_screw(&self, new_pole_screw: NewPoleScrew) -> Result<PoleScrew>;
    async fn update_pole_screw(&self, pole_screw_update: PoleScrewUpdate) -> Result<PoleScrew>;
    async fn delete_pole_screw(&self, pole_screw_id: &str) -> Result<()>;
    fn get_pole_screw(&self, pole_screw_id: &str) -> Result<PoleScrew>;
    fn list_pole_screws(&self, company_id: &str) -> Result<Vec<PoleScrew>>;
}
