use log::debug;
use std::sync::Arc;

use super::groups_model::{Group, GroupItemKind, GroupUpdate, NewGroup, NewGroupItem};
use super::groups_traits::{GroupRepositoryTrait, GroupServiceTrait};
use crate::companies::CompanyRepositoryTrait;
use crate::connectors::ConnectorRepositoryTrait;
use crate::errors::{Error, Result, ValidationError};
use crate::materials::MaterialRepositoryTrait;
use crate::tension::TensionLevel;
use crate::utils::validation::{ensure_positive, normalize_code, optional_text, require_text};

/// Service for managing network groups and their items
pub struct GroupService {
    repository: Arc<dyn GroupRepositoryTrait>,
    company_repository: Arc<dyn CompanyRepositoryTrait>,
    material_repository: Arc<dyn MaterialRepositoryTrait>,
    connector_repository: Arc<dyn ConnectorRepositoryTrait>,
}

impl GroupService {
    pub fn new(
        repository: Arc<dyn GroupRepositoryTrait>,
        company_repository: Arc<dyn CompanyRepositoryTrait>,
        material_repository: Arc<dyn MaterialRepositoryTrait>,
        connector_repository: Arc<dyn ConnectorRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            company_repository,
            material_repository,
            connector_repository,
        }
    }

    fn ensure_code_free(&self, company_id: &str, code: &str, own_id: Option<&str>) -> Result<()> {
        match self.repository.find_by_code(company_id, code)? {
            Some(existing) if Some(existing.id.as_str()) != own_id => Err(
                Error::ConstraintViolation(format!("Group code {} already exists", code)),
            ),
            _ => Ok(()),
        }
    }

    /// Validates items against the company catalog and normalizes references.
    fn validate_items(&self, company_id: &str, items: Vec<NewGroupItem>) -> Result<Vec<NewGroupItem>> {
        if items.is_empty() {
            return Err(ValidationError::InvalidInput(
                "A group needs at least one item".to_string(),
            )
            .into());
        }

        items
            .into_iter()
            .map(|item| {
                ensure_positive("quantity", item.quantity)?;
                let reference_id = optional_text(item.reference_id);
                let owner = match (item.kind, &reference_id) {
                    (GroupItemKind::PoleScrew, None) => None,
                    (GroupItemKind::PoleScrew, Some(_)) => {
                        return Err(ValidationError::InvalidInput(
                            "Pole screw items are sized from the pole and take no reference"
                                .to_string(),
                        )
                        .into())
                    }
                    (kind, None) => {
                        return Err(ValidationError::MissingField(format!(
                            "referenceId ({} item)",
                            kind
                        ))
                        .into())
                    }
                    (GroupItemKind::Material, Some(id)) => {
                        Some(self.material_repository.get_by_id(id)?.company_id)
                    }
                    (GroupItemKind::Connector, Some(id)) => {
                        Some(self.connector_repository.get_by_id(id)?.company_id)
                    }
                };
                if let Some(owner) = owner {
                    if owner != company_id {
                        return Err(ValidationError::InvalidInput(format!(
                            "{} item '{}' belongs to another company",
                            item.kind,
                            reference_id.as_deref().unwrap_or_default()
                        ))
                        .into());
                    }
                }
                Ok(NewGroupItem {
                    reference_id,
                    ..item
                })
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl GroupServiceTrait for GroupService {
    async fn create_group(&self, new_group: NewGroup) -> Result<Group> {
        let company = self.company_repository.get_by_id(&new_group.company_id)?;
        let code = normalize_code(&new_group.code)?;
        self.ensure_code_free(&company.id, &code, None)?;
        let items = self.validate_items(&company.id, new_group.items.clone())?;

        debug!(
            "Creating {} tension group {} with {} items",
            new_group.tension_level,
            code,
            items.len()
        );
        self.repository
            .create(NewGroup {
                company_id: company.id,
                code,
                name: require_text("name", &new_group.name)?,
                items,
                ..new_group
            })
            .await
    }

    async fn update_group(&self, group_update: GroupUpdate) -> Result<Group> {
        let existing = self.repository.get_by_id(&group_update.id)?;
        let code = normalize_code(&group_update.code)?;
        self.ensure_code_free(&existing.company_id, &code, Some(&existing.id))?;
        let items = self.validate_items(&existing.company_id, group_update.items.clone())?;

        self.repository
            .update(GroupUpdate {
                code,
                name: require_text("name", &group_update.name)?,
                items,
                ..group_update
            })
            .await
    }

    async fn delete_group(&self, group_id: &str) -> Result<()> {
        if self.repository.delete(group_id).await? == 0 {
            return Err(Error::not_found("Group", group_id));
        }
        Ok(())
    }

    fn get_group(&self, group_id: &str) -> Result<Group> {
        self.repository.get_by_id(group_id)
    }

    fn list_groups(
        &self,
        company_id: &str,
        tension_level: Option<TensionLevel>,
    ) -> Result<Vec<Group>> {
        self.repository.list_by_company(company_id, tension_level)
    }
}
