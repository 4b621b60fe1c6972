use async_trait::async_trait;

use super::connectors_model::{Connector, ConnectorUpdate, NewConnector};
use crate::errors::Result;

#[async_trait]
pub trait ConnectorRepositoryTrait: Send + Sync {
    async fn create(&self, new_connector: NewConnector) -> Result<Connector>;
    async fn update(&self, connector_update: ConnectorUpdate) -> Result<Connector>;
    async fn delete(&self, connector_id: &str) -> Result<usize>;
    fn get_by_id(&self, connector_id: &str) -> Result<Connector>;
    fn find_by_code(&self, company_id: &str, code: &str) -> Result<Option<Connector>>;
    fn list_by_company(&self, company_id: &str) -> Result<Vec<Connector>>;
}

#[async_trait]
pub trait ConnectorServiceTrait: Send + Sync {
    async fn create_connector(&self, new_connector: NewConnector) -> Result<Connector>;
    async fn update_connector(&self, connector_update: ConnectorUpdate) -> Result<Connector>;
    async fn delete_connector(&self, connector_id: &str) -> Result<()>;
    fn get_connector(&self, connector_id: &str) -> Result<Connector>;
    fn list_connectors(&self, company_id: &str) -> Result<Vec<Connector>>;
}
