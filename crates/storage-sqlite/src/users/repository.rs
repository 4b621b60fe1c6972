use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use gridbudget_core::users::{NewUser, Role, User, UserRepositoryTrait, UserUpdate};
use gridbudget_core::Result;

use super::model::UserDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::users;
use crate::utils::now;

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn load_user(conn: &mut SqliteConnection, user_id: &str) -> Result<User> {
    let row = users::table
        .find(user_id)
        .select(UserDB::as_select())
        .first::<UserDB>(conn)
        .map_err(StorageError::from)?;
    User::try_from(row)
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let row: UserDB = new_user.into();
                diesel::insert_into(users::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                User::try_from(row)
            })
            .await
    }

    async fn update(&self, user_update: UserUpdate) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let existing = users::table
                    .find(&user_update.id)
                    .select(UserDB::as_select())
                    .first::<UserDB>(conn)
                    .map_err(StorageError::from)?;

                let row = UserDB {
                    base_id: user_update.base_id,
                    name: user_update.name,
                    email: user_update.email,
                    is_active: user_update.is_active,
                    updated_at: now(),
                    ..existing
                };
                diesel::update(users::table.find(&row.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                User::try_from(row)
            })
            .await
    }

    async fn delete(&self, user_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(users::table.find(user_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn update_role(&self, user_id: &str, role: Role) -> Result<User> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                diesel::update(users::table.find(&user_id))
                    .set((
                        users::role.eq(role.as_str()),
                        users::updated_at.eq(now()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                load_user(conn, &user_id)
            })
            .await
    }

    async fn update_avatar(&self, user_id: &str, avatar_url: Option<String>) -> Result<User> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                diesel::update(users::table.find(&user_id))
                    .set((
                        users::avatar_url.eq(avatar_url),
                        users::updated_at.eq(now()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                load_user(conn, &user_id)
            })
            .await
    }

    fn get_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        load_user(&mut conn, user_id)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        users::table
            .filter(users::email.eq(email))
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(User::try_from)
            .transpose()
    }

    fn list(&self, company_id: &str, base_id: Option<&str>) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = users::table
            .filter(users::company_id.eq(company_id))
            .into_boxed();
        if let Some(base_id) = base_id {
            query = query.filter(users::base_id.eq(base_id));
        }
        query
            .select(UserDB::as_select())
            .order(users::name.asc())
            .load::<UserDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(User::try_from)
            .collect()
    }
}
