//! SQLite storage implementation for user notifications.

mod model;
mod repository;

pub use model::NotificationDB;
pub use repository::NotificationRepository;
