use log::info;
use std::sync::Arc;

use super::projects_model::{NewProject, Project, ProjectStatus, ProjectUpdate};
use super::projects_traits::{ProjectRepositoryTrait, ProjectServiceTrait};
use crate::bases::BaseRepositoryTrait;
use crate::companies::CompanyRepositoryTrait;
use crate::errors::{Error, Result, ValidationError};
use crate::utils::validation::{ensure_phase_count, optional_text, require_text};

pub struct ProjectService {
    repository: Arc<dyn ProjectRepositoryTrait>,
    company_repository: Arc<dyn CompanyRepositoryTrait>,
    base_repository: Arc<dyn BaseRepositoryTrait>,
}

impl ProjectService {
    pub fn new(
        repository: Arc<dyn ProjectRepositoryTrait>,
        company_repository: Arc<dyn CompanyRepositoryTrait>,
        base_repository: Arc<dyn BaseRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            company_repository,
            base_repository,
        }
    }

    fn resolve_base(&self, company_id: &str, base_id: Option<String>) -> Result<Option<String>> {
        let base_id = optional_text(base_id);
        if let Some(id) = &base_id {
            let base = self.base_repository.get_by_id(id)?;
            if base.company_id != company_id {
                return Err(ValidationError::InvalidInput(format!(
                    "Base '{}' does not belong to the project's company",
                    base.name
                ))
                .into());
            }
        }
        Ok(base_id)
    }
}

#[async_trait::async_trait]
impl ProjectServiceTrait for ProjectService {
    async fn create_project(&self, new_project: NewProject) -> Result<Project> {
        let company = self.company_repository.get_by_id(&new_project.company_id)?;
        ensure_phase_count("mediumTensionPhases", new_project.medium_tension_phases)?;
        ensure_phase_count("lowTensionPhases", new_project.low_tension_phases)?;
        let base_id = self.resolve_base(&company.id, new_project.base_id.clone())?;

        self.repository
            .create(NewProject {
                company_id: company.id,
                base_id,
                name: require_text("name", &new_project.name)?,
                description: optional_text(new_project.description.clone()),
                city: require_text("city", &new_project.city)?,
                ..new_project
            })
            .await
    }

    async fn update_project(&self, project_update: ProjectUpdate) -> Result<Project> {
        let existing = self.repository.get_by_id(&project_update.id)?;
        if existing.status == ProjectStatus::Archived {
            return Err(Error::ConstraintViolation(format!(
                "Project '{}' is archived",
                existing.name
            )));
        }
        ensure_phase_count("mediumTensionPhases", project_update.medium_tension_phases)?;
        ensure_phase_count("lowTensionPhases", project_update.low_tension_phases)?;
        let base_id = self.resolve_base(&existing.company_id, project_update.base_id.clone())?;

        self.repository
            .update(ProjectUpdate {
                base_id,
                name: require_text("name", &project_update.name)?,
                description: optional_text(project_update.description.clone()),
                city: require_text("city", &project_update.city)?,
                ..project_update
            })
            .await
    }

    async fn set_status(&self, project_id: &str, status: ProjectStatus) -> Result<Project> {
        let existing = self.repository.get_by_id(project_id)?;
        if existing.status == status {
            return Ok(existing);
        }
        info!(
            "Project {} status {} -> {}",
            existing.id, existing.status, status
        );
        self.repository.update_status(project_id, status).await
    }

    async fn delete_project(&self, project_id: &str) -> Result<()> {
        if self.repository.delete(project_id).await? == 0 {
            return Err(Error::not_found("Project", project_id));
        }
        Ok(())
    }

    fn get_project(&self, project_id: &str) -> Result<Project> {
        self.repository.get_by_id(project_id)
    }

    fn list_projects(&self, company_id: &str, status: Option<ProjectStatus>) -> Result<Vec<Project>> {
        self.repository.list(company_id, status)
    }
}
