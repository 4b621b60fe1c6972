use chrono::Utc;
use log::{debug, info};
use std::sync::Arc;

use super::budget_calculator::{calculate_budget, BudgetCatalog};
use super::budgets_model::{compare_lines, Budget, BudgetComparison, BudgetSnapshot};
use super::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::cables::CableRepositoryTrait;
use crate::connectors::ConnectorRepositoryTrait;
use crate::errors::{Error, Result, ValidationError};
use crate::groups::GroupRepositoryTrait;
use crate::materials::MaterialRepositoryTrait;
use crate::points::PointRepositoryTrait;
use crate::pole_screws::PoleScrewRepositoryTrait;
use crate::projects::{Project, ProjectRepositoryTrait, ProjectStatus};
use crate::utility_poles::UtilityPoleRepositoryTrait;

/// Repositories the budget service reads the company catalog from.
#[derive(Clone)]
pub struct CatalogRepositories {
    pub materials: Arc<dyn MaterialRepositoryTrait>,
    pub cables: Arc<dyn CableRepositoryTrait>,
    pub connectors: Arc<dyn ConnectorRepositoryTrait>,
    pub pole_screws: Arc<dyn PoleScrewRepositoryTrait>,
    pub utility_poles: Arc<dyn UtilityPoleRepositoryTrait>,
    pub groups: Arc<dyn GroupRepositoryTrait>,
}

/// Service computing and storing project budgets
pub struct BudgetService {
    repository: Arc<dyn BudgetRepositoryTrait>,
    project_repository: Arc<dyn ProjectRepositoryTrait>,
    point_repository: Arc<dyn PointRepositoryTrait>,
    catalog: CatalogRepositories,
}

impl BudgetService {
    pub fn new(
        repository: Arc<dyn BudgetRepositoryTrait>,
        project_repository: Arc<dyn ProjectRepositoryTrait>,
        point_repository: Arc<dyn PointRepositoryTrait>,
        catalog: CatalogRepositories,
    ) -> Self {
        Self {
            repository,
            project_repository,
            point_repository,
            catalog,
        }
    }

    fn load_catalog(&self, company_id: &str) -> Result<BudgetCatalog> {
        Ok(BudgetCatalog::new(
            self.catalog.materials.list_by_company(company_id)?,
            self.catalog.cables.list_by_company(company_id, None)?,
            self.catalog.connectors.list_by_company(company_id)?,
            self.catalog.pole_screws.list_by_company(company_id)?,
            self.catalog.utility_poles.list_by_company(company_id)?,
            self.catalog.groups.list_by_company(company_id, None)?,
        ))
    }

    fn calculate_for(&self, project: &Project) -> Result<Budget> {
        let points = self.point_repository.list_by_project(&project.id)?;
        let catalog = self.load_catalog(&project.company_id)?;
        debug!(
            "Calculating budget for project {} over {} points",
            project.id,
            points.len()
        );
        Ok(calculate_budget(
            project,
            &points,
            &catalog,
            Utc::now().naive_utc(),
        )?)
    }
}

#[async_trait::async_trait]
impl BudgetServiceTrait for BudgetService {
    fn calculate_budget(&self, project_id: &str) -> Result<Budget> {
        let project = self.project_repository.get_by_id(project_id)?;
        self.calculate_for(&project)
    }

    async fn save_budget(&self, project_id: &str) -> Result<BudgetSnapshot> {
        let project = self.project_repository.get_by_id(project_id)?;
        if project.status == ProjectStatus::Archived {
            return Err(Error::ConstraintViolation(format!(
                "Project '{}' is archived",
                project.name
            )));
        }

        let budget = self.calculate_for(&project)?;
        let snapshot = self.repository.save_and_mark_budgeted(budget).await?;
        info!(
            "Saved budget {} for project {} (total {})",
            snapshot.id, project.id, snapshot.total
        );
        Ok(snapshot)
    }

    fn get_budget(&self, budget_id: &str) -> Result<BudgetSnapshot> {
        self.repository.get_by_id(budget_id)
    }

    fn get_latest_budget(&self, project_id: &str) -> Result<Option<BudgetSnapshot>> {
        self.repository.get_latest(project_id)
    }

    fn list_budgets(&self, project_id: &str) -> Result<Vec<BudgetSnapshot>> {
        self.repository.list_by_project(project_id)
    }

    fn compare_budgets(&self, base_budget_id: &str, other_budget_id: &str) -> Result<BudgetComparison> {
        let base = self.repository.get_by_id(base_budget_id)?;
        let other = self.repository.get_by_id(other_budget_id)?;
        if base.project_id != other.project_id {
            return Err(ValidationError::InvalidInput(
                "Only budgets of the same project can be compared".to_string(),
            )
            .into());
        }

        Ok(BudgetComparison {
            lines: compare_lines(&base.lines, &other.lines),
            total_delta: other.total - base.total,
            project_id: base.project_id,
            base_budget_id: base.id,
            other_budget_id: other.id,
        })
    }
}
