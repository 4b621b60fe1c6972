//! SQLite storage for saved budget snapshots.

mod model;
mod repository;

pub use model::BudgetDB;
pub use repository::BudgetRepository;
