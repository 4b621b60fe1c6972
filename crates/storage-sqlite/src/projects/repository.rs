use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use gridbudget_core::projects::{
    NewProject, Project, ProjectRepositoryTrait, ProjectStatus, ProjectUpdate,
};
use gridbudget_core::Result;

use super::model::ProjectDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::projects;
use crate::utils::now;

pub struct ProjectRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ProjectRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn load_project(conn: &mut SqliteConnection, project_id: &str) -> Result<Project> {
    let row = projects::table
        .find(project_id)
        .select(ProjectDB::as_select())
        .first::<ProjectDB>(conn)
        .map_err(StorageError::from)?;
    Project::try_from(row)
}

#[async_trait]
impl ProjectRepositoryTrait for ProjectRepository {
    async fn create(&self, new_project: NewProject) -> Result<Project> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Project> {
                let row: ProjectDB = new_project.into();
                diesel::insert_into(projects::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Project::try_from(row)
            })
            .await
    }

    async fn update(&self, project_update: ProjectUpdate) -> Result<Project> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Project> {
                let existing = projects::table
                    .find(&project_update.id)
                    .select(ProjectDB::as_select())
                    .first::<ProjectDB>(conn)
                    .map_err(StorageError::from)?;

                let row = ProjectDB {
                    base_id: project_update.base_id,
                    name: project_update.name,
                    description: project_update.description,
                    city: project_update.city,
                    medium_tension_phases: project_update.medium_tension_phases,
                    low_tension_phases: project_update.low_tension_phases,
                    updated_at: now(),
                    ..existing
                };
                diesel::update(projects::table.find(&row.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Project::try_from(row)
            })
            .await
    }

    async fn update_status(&self, project_id: &str, status: ProjectStatus) -> Result<Project> {
        let project_id = project_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Project> {
                diesel::update(projects::table.find(&project_id))
                    .set((
                        projects::status.eq(status.as_str()),
                        projects::updated_at.eq(now()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                load_project(conn, &project_id)
            })
            .await
    }

    async fn delete(&self, project_id: &str) -> Result<usize> {
        let project_id = project_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(projects::table.find(project_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    fn get_by_id(&self, project_id: &str) -> Result<Project> {
        let mut conn = get_connection(&self.pool)?;
        load_project(&mut conn, project_id)
    }

    fn list(&self, company_id: &str, status: Option<ProjectStatus>) -> Result<Vec<Project>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = projects::table
            .filter(projects::company_id.eq(company_id))
            .into_boxed();
        if let Some(status) = status {
            query = query.filter(projects::status.eq(status.as_str()));
        }
        query
            .select(ProjectDB::as_select())
            .order((projects::updated_at.desc(), projects::name.asc()))
            .load::<ProjectDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(Project::try_from)
            .collect()
    }
}
