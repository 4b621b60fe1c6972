use std::sync::Arc;

use super::connectors_model::{Connector, ConnectorUpdate, NewConnector};
use super::connectors_traits::{ConnectorRepositoryTrait, ConnectorServiceTrait};
use crate::companies::CompanyRepositoryTrait;
use crate::errors::{Error, Result};
use crate::groups::{GroupItemKind, GroupRepositoryTrait};
use crate::utils::validation::{ensure_non_negative, normalize_code, require_text};

pub struct ConnectorService {
    repository: Arc<dyn ConnectorRepositoryTrait>,
    company_repository: Arc<dyn CompanyRepositoryTrait>,
    group_repository: Arc<dyn GroupRepositoryTrait>,
}

impl ConnectorService {
    pub fn new(
        repository: Arc<dyn ConnectorRepositoryTrait>,
        company_repository: Arc<dyn CompanyRepositoryTrait>,
        group_repository: Arc<dyn GroupRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            company_repository,
            group_repository,
        }
    }

    fn ensure_code_free(&self, company_id: &str, code: &str, own_id: Option<&str>) -> Result<()> {
        match self.repository.find_by_code(company_id, code)? {
            Some(existing) if Some(existing.id.as_str()) != own_id => Err(
                Error::ConstraintViolation(format!("Connector code {} already exists", code)),
            ),
            _ => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl ConnectorServiceTrait for ConnectorService {
    async fn create_connector(&self, new_connector: NewConnector) -> Result<Connector> {
        let company = self
            .company_repository
            .get_by_id(&new_connector.company_id)?;
        let code = normalize_code(&new_connector.code)?;
        ensure_non_negative("unitPrice", new_connector.unit_price)?;
        self.ensure_code_free(&company.id, &code, None)?;

        self.repository
            .create(NewConnector {
                company_id: company.id,
                code,
                description: require_text("description", &new_connector.description)?,
                ..new_connector
            })
            .await
    }

    async fn update_connector(&self, connector_update: ConnectorUpdate) -> Result<Connector> {
        let existing = self.repository.get_by_id(&connector_update.id)?;
        let code = normalize_code(&connector_update.code)?;
        ensure_non_negative("unitPrice", connector_update.unit_price)?;
        self.ensure_code_free(&existing.company_id, &code, Some(&existing.id))?;

        self.repository
            .update(ConnectorUpdate {
                code,
                description: require_text("description", &connector_update.description)?,
                ..connector_update
            })
            .await
    }

    async fn delete_connector(&self, connector_id: &str) -> Result<()> {
        let groups = self
            .group_repository
            .find_referencing_codes(GroupItemKind::Connector, connector_id)?;
        if !groups.is_empty() {
            return Err(Error::ConstraintViolation(format!(
                "Connector {} is used by groups {}",
                connector_id,
                groups.join(", ")
            )));
        }
        if self.repository.delete(connector_id).await? == 0 {
            return Err(Error::not_found("Connector", connector_id));
        }
        Ok(())
    }

    fn get_connector(&self, connector_id: &str) -> Result<Connector> {
        self.repository.get_by_id(connector_id)
    }

    fn list_connectors(&self, company_id: &str) -> Result<Vec<Connector>> {
        self.repository.list_by_company(company_id)
    }
}
