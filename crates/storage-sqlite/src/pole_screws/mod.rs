//! SQLite storage for pole screws.

mod model;
mod repository;

pub use model::PoleScrewDB;
pub use repository::PoleScrewRepository;
