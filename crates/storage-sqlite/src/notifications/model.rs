use chrono::NaiveDateTime;
use diesel::prelude::*;

use gridbudget_core::notifications::{NewNotification, Notification};

use crate::utils::{new_id, now};

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::notifications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NotificationDB {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
    pub read_at: Option<NaiveDateTime>,
}

impl From<NotificationDB> for Notification {
    fn from(db: NotificationDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            title: db.title,
            message: db.message,
            is_read: db.is_read,
            created_at: db.created_at,
            read_at: db.read_at,
        }
    }
}

impl From<NewNotification> for NotificationDB {
    fn from(domain: NewNotification) -> Self {
        Self {
            id: new_id(None),
            user_id: domain.user_id,
            title: domain.title,
            message: domain.message,
            is_read: false,
            created_at: now(),
            read_at: None,
        }
    }
}
