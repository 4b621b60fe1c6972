//! Database model for projects.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use gridbudget_core::errors::Error;
use gridbudget_core::projects::{NewProject, Project, ProjectStatus};

use crate::utils::{new_id, now, parse_enum};

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::projects)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct ProjectDB {
    pub id: String,
    pub company_id: String,
    pub base_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub city: String,
    pub medium_tension_phases: i32,
    pub low_tension_phases: i32,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<ProjectDB> for Project {
    type Error = Error;

    fn try_from(db: ProjectDB) -> Result<Self, Self::Error> {
        Ok(Self {
            status: parse_enum(&db.status, "projects.status")?,
            id: db.id,
            company_id: db.company_id,
            base_id: db.base_id,
            name: db.name,
            description: db.description,
            city: db.city,
            medium_tension_phases: db.medium_tension_phases,
            low_tension_phases: db.low_tension_phases,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewProject> for ProjectDB {
    fn from(domain: NewProject) -> Self {
        let now = now();
        Self {
            id: new_id(domain.id),
            company_id: domain.company_id,
            base_id: domain.base_id,
            name: domain.name,
            description: domain.description,
            city: domain.city,
            medium_tension_phases: domain.medium_tension_phases,
            low_tension_phases: domain.low_tension_phases,
            status: ProjectStatus::default().as_str().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
