//! Budgets module - bill of materials derived from a project's points.
//!
//! [`calculate_budget`] is a pure function over a project, its points and a
//! [`BudgetCatalog`]; [`BudgetService`] loads those from the repositories and
//! persists results as [`BudgetSnapshot`]s.

mod budget_calculator;
mod budgets_model;
mod budgets_service;
mod budgets_traits;

#[cfg(test)]
mod budgets_service_tests;

pub use budget_calculator::{calculate_budget, conductor_count, BudgetCatalog};
pub use budgets_model::{
    compare_lines, Budget, BudgetComparison, BudgetLine, BudgetLineDelta, BudgetLineKind,
    BudgetSnapshot,
};
pub use budgets_service::{BudgetService, CatalogRepositories};
pub use budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
