//! Users module - users, roles and avatars.

mod users_model;
mod users_service;
mod users_traits;


pub use users_model::{normalize_email, NewUser, Role, User, UserUpdate};
pub use users_service::UserService;
pub use users_traits::{UserRepositoryTrait, UserServiceTrait};
