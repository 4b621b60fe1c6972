use std::sync::Arc;

use super::cables_model::{Cable, CableUpdate, NewCable};
use super::cables_traits::{CableRepositoryTrait, CableServiceTrait};
use crate::companies::CompanyRepositoryTrait;
use crate::errors::{Error, Result};
use crate::tension::TensionLevel;
use crate::utils::validation::{ensure_non_negative, ensure_positive, normalize_code, require_text};

pub struct CableService {
    repository: Arc<dyn CableRepositoryTrait>,
    company_repository: Arc<dyn CompanyRepositoryTrait>,
}

impl CableService {
    pub fn new(
        repository: Arc<dyn CableRepositoryTrait>,
        company_repository: Arc<dyn CompanyRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            company_repository,
        }
    }

    fn ensure_code_free(&self, company_id: &str, code: &str, own_id: Option<&str>) -> Result<()> {
        match self.repository.find_by_code(company_id, code)? {
            Some(existing) if Some(existing.id.as_str()) != own_id => Err(
                Error::ConstraintViolation(format!("Cable code {} already exists", code)),
            ),
            _ => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl CableServiceTrait for CableService {
    async fn create_cable(&self, new_cable: NewCable) -> Result<Cable> {
        let company = self.company_repository.get_by_id(&new_cable.company_id)?;
        let code = normalize_code(&new_cable.code)?;
        ensure_positive("sectionMm2", new_cable.section_mm2)?;
        ensure_non_negative("unitPrice", new_cable.unit_price)?;
        self.ensure_code_free(&company.id, &code, None)?;

        self.repository
            .create(NewCable {
                company_id: company.id,
                code,
                description: require_text("description", &new_cable.description)?,
                ..new_cable
            })
            .await
    }

    async fn update_cable(&self, cable_update: CableUpdate) -> Result<Cable> {
        let existing = self.repository.get_by_id(&cable_update.id)?;
        let code = normalize_code(&cable_update.code)?;
        ensure_positive("sectionMm2", cable_update.section_mm2)?;
        ensure_non_negative("unitPrice", cable_update.unit_price)?;
        self.ensure_code_free(&existing.company_id, &code, Some(&existing.id))?;

        self.repository
            .update(CableUpdate {
                code,
                description: require_text("description", &cable_update.description)?,
                ..cable_update
            })
            .await
    }

    async fn delete_cable(&self, cable_id: &str) -> Result<()> {
        if self.repository.delete(cable_id).await? == 0 {
            return Err(Error::not_found("Cable", cable_id));
        }
        Ok(())
    }

    fn get_cable(&self, cable_id: &str) -> Result<Cable> {
        self.repository.get_by_id(cable_id)
    }

    fn list_cables(
        &self,
        company_id: &str,
        tension_level: Option<TensionLevel>,
    ) -> Result<Vec<Cable>> {
        self.repository.list_by_company(company_id, tension_level)
    }
}
