use async_trait::async_trait;

use super::cables_model::{Cable, CableUpdate, NewCable};
use crate::errors::Result;
use crate::tension::TensionLevel;

#[async_trait]
pub trait CableRepositoryTrait: Send + Sync {
    async fn create(&self, new_cable: NewCable) -> Result<Cable>;
    async fn update(&self, cable_update: CableUpdate) -> Result<Cable>;
    async fn delete(&self, cable_id: &str) -> Result<usize>;
    fn get_by_id(&self, cable_id: &str) -> Result<Cable>;
    fn find_by_code(&self, company_id: &str, code: &str) -> Result<Option<Cable>>;
    /// Ordered by code, optionally filtered by tension level.
    fn list_by_company(
        &self,
        company_id: &str,
        tension_level: Option<TensionLevel>,
    ) -> Result<Vec<Cable>>;
}

#[async_trait]
pub trait CableServiceTrait: Send + Sync {
    async fn create_cable(&self, new_cable: NewCable) -> Result<Cable>;
    async fn update_cable(&self, cable_update: CableUpdate) -> Result<Cable>;
    async fn delete_cable(&self, cable_id: &str) -> Result<()>;
    fn get_cable(&self, cable_id: &str) -> Result<Cable>;
    fn list_cables(
        &self,
        company_id: &str,
        tension_level: Option<TensionLevel>,
    ) -> Result<Vec<Cable>>;
}
