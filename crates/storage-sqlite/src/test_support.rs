//! Temp-file database and seed helpers for repository tests.

use std::sync::Arc;

use tempfile::{tempdir, TempDir};

use gridbudget_core::companies::{CompanyRepositoryTrait, NewCompany};
use gridbudget_core::projects::{NewProject, ProjectRepositoryTrait};

use crate::companies::CompanyRepository;
use crate::db::{create_pool, run_migrations, spawn_writer, DbPool, WriteHandle};
use crate::projects::ProjectRepository;

pub struct TestDb {
    pub pool: Arc<DbPool>,
    pub writer: WriteHandle,
    // Dropping the directory deletes the database file.
    _dir: TempDir,
}

pub fn test_db() -> TestDb {
    let dir = tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db").to_string_lossy().to_string();

    let pool = create_pool(&db_path).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    let writer = spawn_writer((*pool).clone());

    TestDb {
        pool,
        writer,
        _dir: dir,
    }
}

pub async fn seed_company(db: &TestDb, id: &str) {
    CompanyRepository::new(Arc::clone(&db.pool), db.writer.clone())
        .create(NewCompany {
            id: Some(id.to_string()),
            name: format!("Company {}", id),
            document: format!("DOC-{}", id),
            is_active: true,
        })
        .await
        .expect("Failed to seed company");
}

pub async fn seed_project(db: &TestDb, id: &str, company_id: &str) {
    ProjectRepository::new(Arc::clone(&db.pool), db.writer.clone())
        .create(NewProject {
            id: Some(id.to_string()),
            company_id: company_id.to_string(),
            base_id: None,
            name: format!("Project {}", id),
            description: None,
            city: "Campinas".to_string(),
            medium_tension_phases: 3,
            low_tension_phases: 3,
        })
        .await
        .expect("Failed to seed project");
}
