use async_trait::async_trait;

use super::projects_model::{NewProject, Project, ProjectStatus, ProjectUpdate};
use crate::errors::Result;

#[async_trait]
pub trait ProjectRepositoryTrait: Send + Sync {
    async fn create(&self, new_project: NewProject) -> Result<Project>;
    async fn update(&self, project_update: ProjectUpdate) -> Result<Project>;
    async fn update_status(&self, project_id: &str, status: ProjectStatus) -> Result<Project>;
    async fn delete(&self, project_id: &str) -> Result<usize>;
    fn get_by_id(&self, project_id: &str) -> Result<Project>;
    /// Most recently updated first.
    fn list(&self, company_id: &str, status: Option<ProjectStatus>) -> Result<Vec<Project>>;
}

#[async_trait]
pub trait ProjectServiceTrait: Send + Sync {
    async fn create_project(&self, new_project: NewProject) -> Result<Project>;
    async fn update_project(&self, project_update: ProjectUpdate) -> Result<Project>;
    async fn set_status(&self, project_id: &str, status: ProjectStatus) -> Result<Project>;
    async fn delete_project(&self, project_id: &str) -> Result<()>;
    fn get_project(&self, project_id: &str) -> Result<Project>;
    fn list_projects(&self, company_id: &str, status: Option<ProjectStatus>) -> Result<Vec<Project>>;
}
