use log::{debug, info};
use std::sync::Arc;

use super::users_model::{normalize_email, NewUser, Role, User, UserUpdate};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::bases::BaseRepositoryTrait;
use crate::companies::CompanyRepositoryTrait;
use crate::errors::{Error, Result, ValidationError};
use crate::utils::validation::{optional_text, require_text};

/// Service for managing users, their roles and avatars
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
    company_repository: Arc<dyn CompanyRepositoryTrait>,
    base_repository: Arc<dyn BaseRepositoryTrait>,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepositoryTrait>,
        company_repository: Arc<dyn CompanyRepositoryTrait>,
        base_repository: Arc<dyn BaseRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            company_repository,
            base_repository,
        }
    }

    fn ensure_email_free(&self, email: &str, own_id: Option<&str>) -> Result<()> {
        match self.repository.find_by_email(email)? {
            Some(existing) if Some(existing.id.as_str()) != own_id => Err(
                Error::ConstraintViolation(format!("Email {} is already in use", email)),
            ),
            _ => Ok(()),
        }
    }

    /// Checks that the base belongs to the company and that the role's base
    /// requirement is met. Returns the normalized base id.
    fn resolve_base(
        &self,
        company_id: &str,
        base_id: Option<String>,
        role: Role,
    ) -> Result<Option<String>> {
        let base_id = optional_text(base_id);
        match &base_id {
            Some(id) => {
                let base = self.base_repository.get_by_id(id)?;
                if base.company_id != company_id {
                    return Err(ValidationError::InvalidInput(format!(
                        "Base '{}' does not belong to company '{}'",
                        base.name, company_id
                    ))
                    .into());
                }
            }
            None if role.requires_base() => {
                return Err(ValidationError::MissingField("baseId".to_string()).into());
            }
            None => {}
        }
        Ok(base_id)
    }
}

#[async_trait::async_trait]
impl UserServiceTrait for UserService {
    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        let company = self.company_repository.get_by_id(&new_user.company_id)?;
        let email = normalize_email(&new_user.email)?;
        self.ensure_email_free(&email, None)?;
        let base_id = self.resolve_base(&company.id, new_user.base_id.clone(), new_user.role)?;

        debug!("Creating user {} with role {}", email, new_user.role);
        self.repository
            .create(NewUser {
                company_id: company.id,
                base_id,
                name: require_text("name", &new_user.name)?,
                email,
                ..new_user
            })
            .await
    }

    async fn update_user(&self, user_update: UserUpdate) -> Result<User> {
        let existing = self.repository.get_by_id(&user_update.id)?;
        let email = normalize_email(&user_update.email)?;
        self.ensure_email_free(&email, Some(&existing.id))?;
        let base_id = self.resolve_base(
            &existing.company_id,
            user_update.base_id.clone(),
            existing.role,
        )?;

        self.repository
            .update(UserUpdate {
                base_id,
                name: require_text("name", &user_update.name)?,
                email,
                ..user_update
            })
            .await
    }

    async fn delete_user(&self, user_id: &str) -> Result<()> {
        if self.repository.delete(user_id).await? == 0 {
            return Err(Error::not_found("User", user_id));
        }
        Ok(())
    }

    async fn change_role(&self, actor_id: &str, user_id: &str, role: Role) -> Result<User> {
        let actor = self.repository.get_by_id(actor_id)?;
        let user = self.repository.get_by_id(user_id)?;

        if !actor.is_active {
            return Err(Error::PermissionDenied(format!(
                "User '{}' is inactive",
                actor.email
            )));
        }
        if actor.id == user.id {
            return Err(Error::PermissionDenied(
                "Users cannot change their own role".to_string(),
            ));
        }
        if actor.role != Role::Admin && actor.company_id != user.company_id {
            return Err(Error::PermissionDenied(format!(
                "User '{}' belongs to another company",
                user.email
            )));
        }
        if !actor.role.can_assign(user.role) || !actor.role.can_assign(role) {
            return Err(Error::PermissionDenied(format!(
                "Role {} cannot change {} to {}",
                actor.role, user.role, role
            )));
        }
        if role.requires_base() && user.base_id.is_none() {
            return Err(ValidationError::InvalidInput(format!(
                "Role {} requires the user to be attached to a base",
                role
            ))
            .into());
        }

        info!(
            "User {} changed role of {} from {} to {}",
            actor.email, user.email, user.role, role
        );
        self.repository.update_role(user_id, role).await
    }

    async fn set_avatar(&self, user_id: &str, avatar_url: Option<String>) -> Result<User> {
        let avatar_url = match avatar_url {
            Some(url) => Some(require_text("avatarUrl", &url)?),
            None => None,
        };
        self.repository.update_avatar(user_id, avatar_url).await
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository.get_by_id(user_id)
    }

    fn get_user_by_email(&self, email: &str) -> Result<User> {
        let email = normalize_email(email)?;
        self.repository
            .find_by_email(&email)?
            .ok_or_else(|| Error::not_found("User", &email))
    }

    fn list_users(&self, company_id: &str, base_id: Option<&str>) -> Result<Vec<User>> {
        self.repository.list(company_id, base_id)
    }
}
