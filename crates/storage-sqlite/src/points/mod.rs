//! SQLite storage for project points.

mod model;
mod repository;

pub use model::PointDB;
pub use repository::PointRepository;
