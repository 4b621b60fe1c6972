use std::sync::Arc;

use super::pole_screws_model::{NewPoleScrew, PoleScrew, PoleScrewUpdate};
use super::pole_screws_traits::{PoleScrewRepositoryTrait, PoleScrewServiceTrait};
use crate::companies::CompanyRepositoryTrait;
use crate::errors::{Error, Result};
use crate::utils::validation::{
    ensure_non_negative, ensure_positive_int, normalize_code, require_text,
};

pub struct PoleScrewService {
    repository: Arc<dyn PoleScrewRepositoryTrait>,
    company_repository: Arc<dyn CompanyRepositoryTrait>,
}

impl PoleScrewService {
    pub fn new(
        repository: Arc<dyn PoleScrewRepositoryTrait>,
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
                Error::ConstraintViolation(format!("Pole screw code {} already exists", code)),
            ),
            _ => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl PoleScrewServiceTrait for PoleScrewService {
    async fn create_pole_screw(&self, new_pole_screw: NewPoleScrew) -> Result<PoleScrew> {
        let company = self
            .company_repository
            .get_by_id(&new_pole_screw.company_id)?;
        let code = normalize_code(&new_pole_screw.code)?;
        ensure_positive_int("lengthMm", new_pole_screw.length_mm)?;
        ensure_non_negative("unitPrice", new_pole_screw.unit_price)?;
        self.ensure_code_free(&company.id, &code, None)?;

        self.repository
            .create(NewPoleScrew {
                company_id: company.id,
                code,
                description: require_text("description", &new_pole_screw.description)?,
                ..new_pole_screw
            })
            .await
    }

    async fn update_pole_screw(&self, pole_screw_update: PoleScrewUpdate) -> Result<PoleScrew> {
        let existing = self.repository.get_by_id(&pole_screw_update.id)?;
        let code = normalize_code(&pole_screw_update.code)?;
        ensure_positive_int("lengthMm", pole_screw_update.length_mm)?;
        ensure_non_negative("unitPrice", pole_screw_update.unit_price)?;
        self.ensure_code_free(&existing.company_id, &code, Some(&existing.id))?;

        self.repository
            .update(PoleScrewUpdate {
                code,
                description: require_text("description", &pole_screw_update.description)?,
                ..pole_screw_update
            })
            .await
    }

    async fn delete_pole_screw(&self, pole_screw_id: &str) -> Result<()> {
        if self.repository.delete(pole_screw_id).await? == 0 {
            return Err(Error::not_found("Pole screw", pole_screw_id));
        }
        Ok(())
    }

    fn get_pole_screw(&self, pole_screw_id: &str) -> Result<PoleScrew> {
        self.repository.get_by_id(pole_screw_id)
    }

    fn list_pole_screws(&self, company_id: &str) -> Result<Vec<PoleScrew>> {
        self.repository.list_by_company(company_id)
    }
}
