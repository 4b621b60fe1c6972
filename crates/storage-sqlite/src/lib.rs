//! SQLite storage implementation for GridBudget.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `gridbudget-core` and contains:
//! - Database connection pooling and the single writer actor
//! - Diesel migrations
//! - Repository implementations for every domain entity
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The core crate and the server only see the repository traits.
//!
//! ```text
//!   server (HTTP)
//!       │
//!       ▼
//!   core (domain) ◄── storage-sqlite (this crate)
//!                            │
//!                            ▼
//!                        SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

// Repository implementations
pub mod bases;
pub mod budgets;
pub mod cables;
pub mod companies;
pub mod connectors;
pub mod groups;
pub mod materials;
pub mod notifications;
pub mod points;
pub mod pole_screws;
pub mod projects;
pub mod users;
pub mod utility_poles;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use bases::BaseRepository;
pub use budgets::BudgetRepository;
pub use cables::CableRepository;
pub use companies::CompanyRepository;
pub use connectors::ConnectorRepository;
pub use groups::GroupRepository;
pub use materials::MaterialRepository;
pub use notifications::NotificationRepository;
pub use points::PointRepository;
pub use pole_screws::PoleScrewRepository;
pub use projects::ProjectRepository;
pub use users::UserRepository;
pub use utility_poles::UtilityPoleRepository;

// Re-export from gridbudget-core for convenience
pub use gridbudget_core::errors::{DatabaseError, Error, Result};
