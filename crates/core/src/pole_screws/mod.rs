//! Pole screws module - through-bolts sized to the pole they are fitted on.

mod pole_screws_model;
mod pole_screws_service;
mod pole_screws_traits;

pub use pole_screws_model::{select_pole_screw, NewPoleScrew, PoleScrew, PoleScrewUpdate};
pub use pole_screws_service::PoleScrewService;
pub use pole_screws_traits::{PoleScrewRepositoryTrait, PoleScrewServiceTrait};
