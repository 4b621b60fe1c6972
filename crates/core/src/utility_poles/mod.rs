//! Utility poles module.

mod utility_poles_model;
mod utility_poles_service;
mod utility_poles_traits;

pub use utility_poles_model::{NewUtilityPole, UtilityPole, UtilityPoleUpdate};
pub use utility_poles_service::UtilityPoleService;
pub use utility_poles_traits::{UtilityPoleRepositoryTrait, UtilityPoleServiceTrait};
