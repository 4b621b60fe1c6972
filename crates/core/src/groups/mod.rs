//! Groups module - structure assemblies applied to network points.
//!
//! A group lists the materials, connectors and pole screws needed to build
//! one structure at a point. Item quantities may scale with the number of
//! phases the project runs at the group's tension level.

mod groups_model;
mod groups_service;
mod groups_traits;

#[cfg(test)]
mod groups_service_tests;

pub use groups_model::{Group, GroupItem, GroupItemKind, GroupUpdate, NewGroup, NewGroupItem};
pub use groups_service::GroupService;
pub use groups_traits::{GroupRepositoryTrait, GroupServiceTrait};
