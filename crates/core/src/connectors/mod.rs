//! Connectors module.

mod connectors_model;
mod connectors_service;
mod connectors_traits;

pub use connectors_model::{Connector, ConnectorUpdate, NewConnector};
pub use connectors_service::ConnectorService;
pub use connectors_traits::{ConnectorRepositoryTrait, ConnectorServiceTrait};
