use async_trait::async_trait;

use super::users_model::{NewUser, Role, User, UserUpdate};
use crate::errors::Result;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    async fn create(&self, new_user: NewUser) -> Result<User>;
    async fn update(&self, user_update: UserUpdate) -> Result<User>;
    async fn delete(&self, user_id: &str) -> Result<usize>;
    async fn update_role(&self, user_id: &str, role: Role) -> Result<User>;
    async fn update_avatar(&self, user_id: &str, avatar_url: Option<String>) -> Result<User>;
    fn get_by_id(&self, user_id: &str) -> Result<User>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    /// Lists users of a company, optionally restricted to one base.
    fn list(&self, company_id: &str, base_id: Option<&str>) -> Result<Vec<User>>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn create_user(&self, new_user: NewUser) -> Result<User>;
    async fn update_user(&self, user_update: UserUpdate) -> Result<User>;
    async fn delete_user(&self, user_id: &str) -> Result<()>;
    /// Changes a user's role on behalf of `actor_id`.
    async fn change_role(&self, actor_id: &str, user_id: &str, role: Role) -> Result<User>;
    /// Sets or clears the stored avatar reference.
    async fn set_avatar(&self, user_id: &str, avatar_url: Option<String>) -> Result<User>;
    fn get_user(&self, user_id: &str) -> Result<User>;
    fn get_user_by_email(&self, email: &str) -> Result<User>;
    fn list_users(&self, company_id: &str, base_id: Option<&str>) -> Result<Vec<User>>;
}
