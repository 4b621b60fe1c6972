use async_trait::async_trait;

use super::notifications_model::{NewNotification, Notification};
use crate::errors::Result;

#[async_trait]
pub trait NotificationRepositoryTrait: Send + Sync {
    async fn create(&self, new_notification: NewNotification) -> Result<Notification>;
    /// Marks a notification read. An already-read notification keeps its
    /// original `read_at`.
    async fn mark_as_read(&self, notification_id: &str) -> Result<Notification>;
    /// Returns the number of notifications that changed state.
    async fn mark_all_as_read(&self, user_id: &str) -> Result<usize>;
    async fn delete(&self, notification_id: &str) -> Result<usize>;
    /// Newest first.
    fn list_for_user(&self, user_id: &str, unread_only: bool) -> Result<Vec<Notification>>;
    fn count_unread(&self, user_id: &str) -> Result<i64>;
}

#[async_trait]
pub trait NotificationServiceTrait: Send + Sync {
    async fn notify(&self, new_notification: NewNotification) -> Result<Notification>;
    async fn mark_as_read(&self, notification_id: &str) -> Result<Notification>;
    async fn mark_all_as_read(&self, user_id: &str) -> Result<usize>;
    async fn delete_notification(&self, notification_id: &str) -> Result<()>;
    fn list_notifications(&self, user_id: &str, unread_only: bool) -> Result<Vec<Notification>>;
    fn count_unread(&self, user_id: &str) -> Result<i64>;
}
