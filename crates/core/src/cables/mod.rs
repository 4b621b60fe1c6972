//! Cables module - conductors priced per meter.

mod cables_model;
mod cables_service;
mod cables_traits;

pub use cables_model::{Cable, CableUpdate, NewCable};
pub use cables_service::CableService;
pub use cables_traits::{CableRepositoryTrait, CableServiceTrait};
