use chrono::NaiveDateTime;
use diesel::prelude::*;

use gridbudget_core::errors::Error;
use gridbudget_core::users::{NewUser, User};

use crate::utils::{new_id, now, parse_enum};

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct UserDB {
    pub id: String,
    pub company_id: String,
    pub base_id: Option<String>,
    pub name: String,
    pub email: String,
    pub role: String,
    pub avatar_url: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<UserDB> for User {
    type Error = Error;

    fn try_from(db: UserDB) -> Result<Self, Self::Error> {
        Ok(Self {
            role: parse_enum(&db.role, "users.role")?,
            id: db.id,
            company_id: db.company_id,
            base_id: db.base_id,
            name: db.name,
            email: db.email,
            avatar_url: db.avatar_url,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewUser> for UserDB {
    fn from(domain: NewUser) -> Self {
        let now = now();
        Self {
            id: new_id(domain.id),
            company_id: domain.company_id,
            base_id: domain.base_id,
            name: domain.name,
            email: domain.email,
            role: domain.role.as_str().to_string(),
            avatar_url: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
