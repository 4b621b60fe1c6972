//! Points module - the ordered stations of a project's network.

mod points_model;
mod points_service;
mod points_traits;


pub use points_model::{NewPoint, Point, PointUpdate};
pub use points_service::PointService;
pub use points_traits::{PointRepositoryTrait, PointServiceTrait};
