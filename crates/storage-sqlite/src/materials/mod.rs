mod model;
mod repository;

pub use model::MaterialDB;
pub use repository::MaterialRepository;
