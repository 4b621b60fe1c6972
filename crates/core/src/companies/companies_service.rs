use log::debug;
use std::sync::Arc;

use super::companies_model::{normalize_document, Company, CompanyUpdate, NewCompany};
use super::companies_traits::{CompanyRepositoryTrait, CompanyServiceTrait};
use crate::errors::{Error, Result};
use crate::utils::validation::require_text;

/// Service for managing companies
pub struct CompanyService {
    repository: Arc<dyn CompanyRepositoryTrait>,
}

impl CompanyService {
    pub fn new(repository: Arc<dyn CompanyRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn ensure_document_free(&self, document: &str, own_id: Option<&str>) -> Result<()> {
        if let Some(existing) = self.repository.find_by_document(document)? {
            if Some(existing.id.as_str()) != own_id {
                return Err(Error::ConstraintViolation(format!(
                    "Document {} is already registered to company '{}'",
                    document, existing.name
                )));
            }
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl CompanyServiceTrait for CompanyService {
    async fn create_company(&self, new_company: NewCompany) -> Result<Company> {
        let document = normalize_document(&new_company.document)?;
        self.ensure_document_free(&document, None)?;
        debug!("Creating company with document {}", document);

        self.repository
            .create(NewCompany {
                name: require_text("name", &new_company.name)?,
                document,
                ..new_company
            })
            .await
    }

    async fn update_company(&self, company_update: CompanyUpdate) -> Result<Company> {
        let document = normalize_document(&company_update.document)?;
        self.ensure_document_free(&document, Some(&company_update.id))?;

        self.repository
            .update(CompanyUpdate {
                name: require_text("name", &company_update.name)?,
                document,
                ..company_update
            })
            .await
    }

    async fn delete_company(&self, company_id: &str) -> Result<()> {
        let deleted = self.repository.delete(company_id).await?;
        if deleted == 0 {
            return Err(Error::not_found("Company", company_id));
        }
        Ok(())
    }

    fn get_company(&self, company_id: &str) -> Result<Company> {
        self.repository.get_by_id(company_id)
    }

    fn list_companies(&self) -> Result<Vec<Company>> {
        self.repository.list()
    }
}
