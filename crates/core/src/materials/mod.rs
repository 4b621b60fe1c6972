//! Materials module - priced catalog of generic network materials.

mod materials_model;
mod materials_service;
mod materials_traits;

pub use materials_model::{Material, MaterialUpdate, NewMaterial};
pub use materials_service::MaterialService;
pub use materials_traits::{MaterialRepositoryTrait, MaterialServiceTrait};
