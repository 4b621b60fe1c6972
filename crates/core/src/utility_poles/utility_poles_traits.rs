use async_trait::async_trait;

use super::utility_poles_model::{NewUtilityPole, UtilityPole, UtilityPoleUpdate};
use crate::errors::Result;

#[async_trait]
pub trait UtilityPoleRepositoryTrait: Send + Sync {
    async fn create(&self, new_pole: NewUtilityPole) -> Result<UtilityPole>;
    async fn update(&self, pole_update: UtilityPoleUpdate) -> Result<UtilityPole>;
    async fn delete(&self, pole_id: &str) -> Result<usize>;
    fn get_by_id(&self, pole_id: &str) -> Result<UtilityPole>;
    fn find_by_code(&self, company_id: &str, code: &str) -> Result<Option<UtilityPole>>;
    fn list_by_company(&self, company_id: &str) -> Result<Vec<UtilityPole>>;
}

#[async_trait]
pub trait UtilityPoleServiceTrait: Send + Sync {
    async fn create_utility_pole(&self, new_pole: NewUtilityPole) -> Result<UtilityPole>;
    async fn update_utility_pole(&self, pole_update: UtilityPoleUpdate) -> Result<UtilityPole>;
    async fn delete_utility_pole(&self, pole_id: &str) -> Result<()>;
    fn get_utility_pole(&self, pole_id: &str) -> Result<UtilityPole>;
    fn list_utility_poles(&self, company_id: &str) -> Result<Vec<UtilityPole>>;
}
