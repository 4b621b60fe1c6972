mod model;
mod repository;

pub use model::ConnectorDB;
pub use repository::ConnectorRepository;
