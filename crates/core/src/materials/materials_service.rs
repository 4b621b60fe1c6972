use log::debug;
use std::sync::Arc;

use super::materials_model::{Material, MaterialUpdate, NewMaterial};
use super::materials_traits::{MaterialRepositoryTrait, MaterialServiceTrait};
use crate::companies::CompanyRepositoryTrait;
use crate::errors::{Error, Result};
use crate::groups::{GroupItemKind, GroupRepositoryTrait};
use crate::utils::validation::{ensure_non_negative, normalize_code, require_text};

/// Service for managing the material catalog
pub struct MaterialService {
    repository: Arc<dyn MaterialRepositoryTrait>,
    company_repository: Arc<dyn CompanyRepositoryTrait>,
    group_repository: Arc<dyn GroupRepositoryTrait>,
}

impl MaterialService {
    pub fn new(
        repository: Arc<dyn MaterialRepositoryTrait>,
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
                Error::ConstraintViolation(format!("Material code {} already exists", code)),
            ),
            _ => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl MaterialServiceTrait for MaterialService {
    async fn create_material(&self, new_material: NewMaterial) -> Result<Material> {
        let company = self.company_repository.get_by_id(&new_material.company_id)?;
        let code = normalize_code(&new_material.code)?;
        ensure_non_negative("unitPrice", new_material.unit_price)?;
        self.ensure_code_free(&company.id, &code, None)?;

        debug!("Creating material {} for company {}", code, company.id);
        self.repository
            .create(NewMaterial {
                company_id: company.id,
                code,
                description: require_text("description", &new_material.description)?,
                unit: normalize_code(&new_material.unit)?,
                ..new_material
            })
            .await
    }

    async fn update_material(&self, material_update: MaterialUpdate) -> Result<Material> {
        let existing = self.repository.get_by_id(&material_update.id)?;
        let code = normalize_code(&material_update.code)?;
        ensure_non_negative("unitPrice", material_update.unit_price)?;
        self.ensure_code_free(&existing.company_id, &code, Some(&existing.id))?;

        self.repository
            .update(MaterialUpdate {
                code,
                description: require_text("description", &material_update.description)?,
                unit: normalize_code(&material_update.unit)?,
                ..material_update
            })
            .await
    }

    async fn delete_material(&self, material_id: &str) -> Result<()> {
        let groups = self
            .group_repository
            .find_referencing_codes(GroupItemKind::Material, material_id)?;
        if !groups.is_empty() {
            return Err(Error::ConstraintViolation(format!(
                "Material {} is used by groups {}",
                material_id,
                groups.join(", ")
            )));
        }
        if self.repository.delete(material_id).await? == 0 {
            return Err(Error::not_found("Material", material_id));
        }
        Ok(())
    }

    fn get_material(&self, material_id: &str) -> Result<Material> {
        self.repository.get_by_id(material_id)
    }

    fn list_materials(&self, company_id: &str) -> Result<Vec<Material>> {
        self.repository.list_by_company(company_id)
    }

    fn search_materials(&self, company_id: &str, query: &str) -> Result<Vec<Material>> {
        Ok(self
            .repository
            .list_by_company(company_id)?
            .into_iter()
            .filter(|m| m.matches(query))
            .collect())
    }
}
