use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use gridbudget_core::notifications::{NewNotification, Notification, NotificationRepositoryTrait};
use gridbudget_core::Result;

use super::model::NotificationDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::notifications;
use crate::utils::now;

pub struct NotificationRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl NotificationRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl NotificationRepositoryTrait for NotificationRepository {
    async fn create(&self, new_notification: NewNotification) -> Result<Notification> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Notification> {
                let row: NotificationDB = new_notification.into();
                diesel::insert_into(notifications::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(row.into())
            })
            .await
    }

    async fn mark_as_read(&self, notification_id: &str) -> Result<Notification> {
        let notification_id = notification_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Notification> {
                // Already-read notifications keep their original read_at.
                diesel::update(
                    notifications::table
                        .find(&notification_id)
                        .filter(notifications::is_read.eq(false)),
                )
                .set((
                    notifications::is_read.eq(true),
                    notifications::read_at.eq(Some(now())),
                ))
                .execute(conn)
                .map_err(StorageError::from)?;

                let row = notifications::table
                    .find(&notification_id)
                    .select(NotificationDB::as_select())
                    .first::<NotificationDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(row.into())
            })
            .await
    }

    async fn mark_all_as_read(&self, user_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::update(
                    notifications::table
                        .filter(notifications::user_id.eq(&user_id))
                        .filter(notifications::is_read.eq(false)),
                )
                .set((
                    notifications::is_read.eq(true),
                    notifications::read_at.eq(Some(now())),
                ))
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }

    async fn delete(&self, notification_id: &str) -> Result<usize> {
        let notification_id = notification_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(notifications::table.find(notification_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    fn list_for_user(&self, user_id: &str, unread_only: bool) -> Result<Vec<Notification>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = notifications::table
            .filter(notifications::user_id.eq(user_id))
            .into_boxed();
        if unread_only {
            query = query.filter(notifications::is_read.eq(false));
        }
        let rows = query
            .select(NotificationDB::as_select())
            .order(notifications::created_at.desc())
            .load::<NotificationDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Notification::from).collect())
    }

    fn count_unread(&self, user_id: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        Ok(notifications::table
            .filter(notifications::user_id.eq(user_id))
            .filter(notifications::is_read.eq(false))
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?)
    }
}
