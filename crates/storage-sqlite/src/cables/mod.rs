mod model;
mod repository;

pub use model::CableDB;
pub use repository::CableRepository;
