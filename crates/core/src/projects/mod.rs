//! Projects module - a network design to be budgeted.

mod projects_model;
mod projects_service;
mod projects_traits;

pub use projects_model::{NewProject, Project, ProjectStatus, ProjectUpdate};
pub use projects_service::ProjectService;
pub use projects_traits::{ProjectRepositoryTrait, ProjectServiceTrait};
