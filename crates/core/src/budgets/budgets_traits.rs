use async_trait::async_trait;

use super::budgets_model::{Budget, BudgetComparison, BudgetSnapshot};
use crate::errors::Result;

/// Trait for budget snapshot persistence
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    /// Persists a new snapshot and moves a DRAFT project to BUDGETED in the
    /// same transaction.
    async fn save_and_mark_budgeted(&self, budget: Budget) -> Result<BudgetSnapshot>;
    fn get_by_id(&self, budget_id: &str) -> Result<BudgetSnapshot>;
    fn get_latest(&self, project_id: &str) -> Result<Option<BudgetSnapshot>>;
    /// Newest first.
    fn list_by_project(&self, project_id: &str) -> Result<Vec<BudgetSnapshot>>;
}

/// Trait for budget service operations
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    /// Computes the current budget of a project without persisting it.
    fn calculate_budget(&self, project_id: &str) -> Result<Budget>;
    /// Computes and persists a snapshot, moving a draft project to budgeted.
    async fn save_budget(&self, project_id: &str) -> Result<BudgetSnapshot>;
    fn get_budget(&self, budget_id: &str) -> Result<BudgetSnapshot>;
    fn get_latest_budget(&self, project_id: &str) -> Result<Option<BudgetSnapshot>>;
    fn list_budgets(&self, project_id: &str) -> Result<Vec<BudgetSnapshot>>;
    fn compare_budgets(&self, base_budget_id: &str, other_budget_id: &str) -> Result<BudgetComparison>;
}
