use std::sync::Arc;

use super::bases_model::{Base, BaseUpdate, NewBase};
use super::bases_traits::{BaseRepositoryTrait, BaseServiceTrait};
use crate::companies::CompanyRepositoryTrait;
use crate::users::UserRepositoryTrait;
use crate::errors::{Error, Result, ValidationError};
use crate::utils::validation::require_text;

pub struct BaseService {
    repository: Arc<dyn BaseRepositoryTrait>,
    company_repository: Arc<dyn CompanyRepositoryTrait>,
    user_repository: Arc<dyn UserRepositoryTrait>,
}

impl BaseService {
    pub fn new(
        repository: Arc<dyn BaseRepositoryTrait>,
        company_repository: Arc<dyn CompanyRepositoryTrait>,
        user_repository: Arc<dyn UserRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            company_repository,
            user_repository,
        }
    }
}

fn normalize_state(state: &str) -> Result<String> {
    let state = state.trim().to_uppercase();
    if state.len() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidInput(format!(
            "State must be a two-letter code (got '{}')",
            state
        ))
        .into());
    }
    Ok(state)
}

#[async_trait::async_trait]
impl BaseServiceTrait for BaseService {
    async fn create_base(&self, new_base: NewBase) -> Result<Base> {
        let company = self.company_repository.get_by_id(&new_base.company_id)?;
        self.repository
            .create(NewBase {
                company_id: company.id,
                name: require_text("name", &new_base.name)?,
                city: require_text("city", &new_base.city)?,
                state: normalize_state(&new_base.state)?,
                ..new_base
            })
            .await
    }

    async fn update_base(&self, base_update: BaseUpdate) -> Result<Base> {
        self.repository
            .update(BaseUpdate {
                name: require_text("name", &base_update.name)?,
                city: require_text("city", &base_update.city)?,
                state: normalize_state(&base_update.state)?,
                ..base_update
            })
            .await
    }

    async fn delete_base(&self, base_id: &str) -> Result<()> {
        let base = self.repository.get_by_id(base_id)?;
        // Base-bound roles cannot lose their base.
        let bound = self
            .user_repository
            .list(&base.company_id, Some(&base.id))?
            .into_iter()
            .filter(|u| u.role.requires_base())
            .count();
        if bound > 0 {
            return Err(Error::ConstraintViolation(format!(
                "Base {} still has {} user(s) whose role requires a base",
                base.id, bound
            )));
        }

        if self.repository.delete(base_id).await? == 0 {
            return Err(Error::not_found("Base", base_id));
        }
        Ok(())
    }

    fn get_base(&self, base_id: &str) -> Result<Base> {
        self.repository.get_by_id(base_id)
    }

    fn list_bases(&self, company_id: &str) -> Result<Vec<Base>> {
        self.repository.list_by_company(company_id)
    }
}
