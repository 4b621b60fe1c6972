mod model;
mod repository;

pub use model::UtilityPoleDB;
pub use repository::UtilityPoleRepository;
