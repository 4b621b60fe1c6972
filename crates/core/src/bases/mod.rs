//! Bases module - operational bases of a company.

mod bases_model;
mod bases_service;
mod bases_traits;

pub use bases_model::{Base, BaseUpdate, NewBase};
pub use bases_service::BaseService;
pub use bases_traits::{BaseRepositoryTrait, BaseServiceTrait};
