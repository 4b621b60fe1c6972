//! GridBudget Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for budgeting electrical
//! distribution network projects: the tenant model (companies, bases,
//! users), the priced catalog (materials, cables, connectors, pole screws,
//! utility poles, groups), projects with their points, and the budget
//! calculator. It is database-agnostic and defines traits that are
//! implemented by the `storage-sqlite` crate.

pub mod bases;
pub mod budgets;
pub mod cables;
pub mod companies;
pub mod connectors;
pub mod constants;
pub mod errors;
pub mod groups;
pub mod materials;
pub mod notifications;
pub mod points;
pub mod pole_screws;
pub mod projects;
pub mod tension;
pub mod users;
pub mod utility_poles;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use tension::TensionLevel;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
