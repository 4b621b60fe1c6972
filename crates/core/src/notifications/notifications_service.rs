use log::debug;
use std::sync::Arc;

use super::notifications_model::{NewNotification, Notification};
use super::notifications_traits::{NotificationRepositoryTrait, NotificationServiceTrait};
use crate::errors::{Error, Result};
use crate::users::UserRepositoryTrait;
use crate::utils::validation::require_text;

pub struct NotificationService {
    repository: Arc<dyn NotificationRepositoryTrait>,
    user_repository: Arc<dyn UserRepositoryTrait>,
}

impl NotificationService {
    pub fn new(
        repository: Arc<dyn NotificationRepositoryTrait>,
        user_repository: Arc<dyn UserRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            user_repository,
        }
    }
}

#[async_trait::async_trait]
impl NotificationServiceTrait for NotificationService {
    async fn notify(&self, new_notification: NewNotification) -> Result<Notification> {
        let user = self.user_repository.get_by_id(&new_notification.user_id)?;
        debug!("Notifying user {}: {}", user.email, new_notification.title);
        self.repository
            .create(NewNotification {
                user_id: user.id,
                title: require_text("title", &new_notification.title)?,
                message: require_text("message", &new_notification.message)?,
            })
            .await
    }

    async fn mark_as_read(&self, notification_id: &str) -> Result<Notification> {
        self.repository.mark_as_read(notification_id).await
    }

    async fn mark_all_as_read(&self, user_id: &str) -> Result<usize> {
        self.repository.mark_all_as_read(user_id).await
    }

    async fn delete_notification(&self, notification_id: &str) -> Result<()> {
        if self.repository.delete(notification_id).await? == 0 {
            return Err(Error::not_found("Notification", notification_id));
        }
        Ok(())
    }

    fn list_notifications(&self, user_id: &str, unread_only: bool) -> Result<Vec<Notification>> {
        self.repository.list_for_user(user_id, unread_only)
    }

    fn count_unread(&self, user_id: &str) -> Result<i64> {
        self.repository.count_unread(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::InMemoryStore;
    use crate::users::Role;

    fn notice(user_id: &str, title: &str) -> NewNotification {
        NewNotification {
            user_id: user_id.to_string(),
            title: title.to_string(),
            message: "Budget ready for review".to_string(),
        }
    }

    #[tokio::test]
    async fn test_unread_lifecycle() {
        let store = InMemoryStore::new();
        store.seed_company("c1");
        store.seed_user("u1", "c1", None, Role::CompanyAdmin);
        let service = NotificationService::new(store.clone(), store.clone());

        let first = service.notify(notice("u1", " Budget saved ")).await.unwrap();
        service.notify(notice("u1", "Project archived")).await.unwrap();
        assert_eq!(first.title, "Budget saved");
        assert_eq!(service.count_unread("u1").unwrap(), 2);

        let read = service.mark_as_read(&first.id).await.unwrap();
        assert!(read.is_read);
        assert!(read.read_at.is_some());
        assert_eq!(service.list_notifications("u1", true).unwrap().len(), 1);

        assert_eq!(service.mark_all_as_read("u1").await.unwrap(), 1);
        assert_eq!(service.count_unread("u1").unwrap(), 0);
        assert_eq!(service.list_notifications("u1", false).unwrap().len(), 2);

        service.delete_notification(&first.id).await.unwrap();
        assert!(service
            .delete_notification(&first.id)
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_notify_unknown_user_fails() {
        let store = InMemoryStore::new();
        let service = NotificationService::new(store.clone(), store.clone());
        let err = service.notify(notice("ghost", "Hello")).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
