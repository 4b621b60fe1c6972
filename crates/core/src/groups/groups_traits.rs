use async_trait::async_trait;

use super::groups_model::{Group, GroupItemKind, GroupUpdate, NewGroup};
use crate::errors::Result;
use crate::tension::TensionLevel;

/// Trait for group repository operations.
///
/// Groups are always read and written together with their items.
#[async_trait]
pub trait GroupRepositoryTrait: Send + Sync {
    async fn create(&self, new_group: NewGroup) -> Result<Group>;
    /// Replaces the header and all items in one transaction.
    async fn update(&self, group_update: GroupUpdate) -> Result<Group>;
    async fn delete(&self, group_id: &str) -> Result<usize>;
    fn get_by_id(&self, group_id: &str) -> Result<Group>;
    fn find_by_code(&self, company_id: &str, code: &str) -> Result<Option<Group>>;
    fn list_by_company(
        &self,
        company_id: &str,
        tension_level: Option<TensionLevel>,
    ) -> Result<Vec<Group>>;
    /// Codes of the groups with an item pointing at `reference_id`.
    fn find_referencing_codes(
        &self,
        kind: GroupItemKind,
        reference_id: &str,
    ) -> Result<Vec<String>>;
}

#[async_trait]
pub trait GroupServiceTrait: Send + Sync {
    async fn create_group(&self, new_group: NewGroup) -> Result<Group>;
    async fn update_group(&self, group_update: GroupUpdate) -> Result<Group>;
    async fn delete_group(&self, group_id: &str) -> Result<()>;
    fn get_group(&self, group_id: &str) -> Result<Group>;
    fn list_groups(
        &self,
        company_id: &str,
        tension_level: Option<TensionLevel>,
    ) -> Result<Vec<Group>>;
}
