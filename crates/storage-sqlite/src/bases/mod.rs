//! SQLite storage implementation for operational bases.

mod model;
mod repository;

pub use model::BaseDB;
pub use repository::BaseRepository;
