//! Companies module - tenant records owning every other entity.

mod companies_model;
mod companies_service;
mod companies_traits;

pub use companies_model::{normalize_document, Company, CompanyUpdate, NewCompany};
pub use companies_service::CompanyService;
pub use companies_traits::{CompanyRepositoryTrait, CompanyServiceTrait};
