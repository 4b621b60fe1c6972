use std::sync::Arc;

use rust_decimal::Decimal;

use super::utility_poles_model::{NewUtilityPole, UtilityPole, UtilityPoleUpdate};
use super::utility_poles_traits::{UtilityPoleRepositoryTrait, UtilityPoleServiceTrait};
use crate::companies::CompanyRepositoryTrait;
use crate::errors::{Error, Result};
use crate::utils::validation::{
    ensure_non_negative, ensure_positive, ensure_positive_int, normalize_code, require_text,
};

pub struct UtilityPoleService {
    repository: Arc<dyn UtilityPoleRepositoryTrait>,
    company_repository: Arc<dyn CompanyRepositoryTrait>,
}

impl UtilityPoleService {
    pub fn new(
        repository: Arc<dyn UtilityPoleRepositoryTrait>,
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
                Error::ConstraintViolation(format!("Utility pole code {} already exists", code)),
            ),
            _ => Ok(()),
        }
    }
}

fn validate_dimensions(
    height_m: Decimal,
    strength_dan: i32,
    min_screw_length_mm: i32,
    unit_price: Decimal,
) -> Result<()> {
    ensure_positive("heightM", height_m)?;
    ensure_positive_int("strengthDan", strength_dan)?;
    ensure_positive_int("minScrewLengthMm", min_screw_length_mm)?;
    ensure_non_negative("unitPrice", unit_price)
}

#[async_trait::async_trait]
impl UtilityPoleServiceTrait for UtilityPoleService {
    async fn create_utility_pole(&self, new_pole: NewUtilityPole) -> Result<UtilityPole> {
        let company = self.company_repository.get_by_id(&new_pole.company_id)?;
        let code = normalize_code(&new_pole.code)?;
        validate_dimensions(
            new_pole.height_m,
            new_pole.strength_dan,
            new_pole.min_screw_length_mm,
            new_pole.unit_price,
        )?;
        self.ensure_code_free(&company.id, &code, None)?;

        self.repository
            .create(NewUtilityPole {
                company_id: company.id,
                code,
                description: require_text("description", &new_pole.description)?,
                ..new_pole
            })
            .await
    }

    async fn update_utility_pole(&self, pole_update: UtilityPoleUpdate) -> Result<UtilityPole> {
        let existing = self.repository.get_by_id(&pole_update.id)?;
        let code = normalize_code(&pole_update.code)?;
        validate_dimensions(
            pole_update.height_m,
            pole_update.strength_dan,
            pole_update.min_screw_length_mm,
            pole_update.unit_price,
        )?;
        self.ensure_code_free(&existing.company_id, &code, Some(&existing.id))?;

        self.repository
            .update(UtilityPoleUpdate {
                code,
                description: require_text("description", &pole_update.description)?,
                ..pole_update
            })
            .await
    }

    async fn delete_utility_pole(&self, pole_id: &str) -> Result<()> {
        if self.repository.delete(pole_id).await? == 0 {
            return Err(Error::not_found("Utility pole", pole_id));
        }
        Ok(())
    }

    fn get_utility_pole(&self, pole_id: &str) -> Result<UtilityPole> {
        self.repository.get_by_id(pole_id)
    }

    fn list_utility_poles(&self, company_id: &str) -> Result<Vec<UtilityPole>> {
        self.repository.list_by_company(company_id)
    }
}
