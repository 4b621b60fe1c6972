use std::sync::Arc;

use crate::config::Config;
use gridbudget_core::{
    bases::{BaseService, BaseServiceTrait},
    budgets::{BudgetService, BudgetServiceTrait, CatalogRepositories},
    cables::{CableService, CableServiceTrait},
    companies::{CompanyService, CompanyServiceTrait},
    connectors::{ConnectorService, ConnectorServiceTrait},
    groups::{GroupService, GroupServiceTrait},
    materials::{MaterialService, MaterialServiceTrait},
    notifications::{NotificationService, NotificationServiceTrait},
    points::{PointService, PointServiceTrait},
    pole_screws::{PoleScrewService, PoleScrewServiceTrait},
    projects::{ProjectService, ProjectServiceTrait},
    users::{UserService, UserServiceTrait},
    utility_poles::{UtilityPoleService, UtilityPoleServiceTrait},
};
use gridbudget_storage_sqlite::{
    db, BaseRepository, BudgetRepository, CableRepository, CompanyRepository,
    ConnectorRepository, GroupRepository, MaterialRepository, NotificationRepository,
    PointRepository, PoleScrewRepository, ProjectRepository, UserRepository,
    UtilityPoleRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub company_service: Arc<dyn CompanyServiceTrait + Send + Sync>,
    pub base_service: Arc<dyn BaseServiceTrait + Send + Sync>,
    pub user_service: Arc<dyn UserServiceTrait + Send + Sync>,
    pub notification_service: Arc<dyn NotificationServiceTrait + Send + Sync>,
    pub material_service: Arc<dyn MaterialServiceTrait + Send + Sync>,
    pub cable_service: Arc<dyn CableServiceTrait + Send + Sync>,
    pub connector_service: Arc<dyn ConnectorServiceTrait + Send + Sync>,
    pub pole_screw_service: Arc<dyn PoleScrewServiceTrait + Send + Sync>,
    pub utility_pole_service: Arc<dyn UtilityPoleServiceTrait + Send + Sync>,
    pub group_service: Arc<dyn GroupServiceTrait + Send + Sync>,
    pub project_service: Arc<dyn ProjectServiceTrait + Send + Sync>,
    pub point_service: Arc<dyn PointServiceTrait + Send + Sync>,
    pub budget_service: Arc<dyn BudgetServiceTrait + Send + Sync>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("GB_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // `try_init` leaves an already-installed subscriber in place.
    let result = if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .try_init()
    };
    if let Err(e) = result {
        eprintln!("Tracing was not initialized: {}", e);
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let company_repo = Arc::new(CompanyRepository::new(pool.clone(), writer.clone()));
    let base_repo = Arc::new(BaseRepository::new(pool.clone(), writer.clone()));
    let user_repo = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let notification_repo = Arc::new(NotificationRepository::new(pool.clone(), writer.clone()));
    let material_repo = Arc::new(MaterialRepository::new(pool.clone(), writer.clone()));
    let cable_repo = Arc::new(CableRepository::new(pool.clone(), writer.clone()));
    let connector_repo = Arc::new(ConnectorRepository::new(pool.clone(), writer.clone()));
    let pole_screw_repo = Arc::new(PoleScrewRepository::new(pool.clone(), writer.clone()));
    let utility_pole_repo = Arc::new(UtilityPoleRepository::new(pool.clone(), writer.clone()));
    let group_repo = Arc::new(GroupRepository::new(pool.clone(), writer.clone()));
    let project_repo = Arc::new(ProjectRepository::new(pool.clone(), writer.clone()));
    let point_repo = Arc::new(PointRepository::new(pool.clone(), writer.clone()));
    let budget_repo = Arc::new(BudgetRepository::new(pool.clone(), writer.clone()));

    let company_service = Arc::new(CompanyService::new(company_repo.clone()));
    let base_service = Arc::new(BaseService::new(
        base_repo.clone(),
        company_repo.clone(),
        user_repo.clone(),
    ));
    let user_service = Arc::new(UserService::new(
        user_repo.clone(),
        company_repo.clone(),
        base_repo.clone(),
    ));
    let notification_service = Arc::new(NotificationService::new(
        notification_repo,
        user_repo.clone(),
    ));

    let material_service = Arc::new(MaterialService::new(
        material_repo.clone(),
        company_repo.clone(),
        group_repo.clone(),
    ));
    let cable_service = Arc::new(CableService::new(cable_repo.clone(), company_repo.clone()));
    let connector_service = Arc::new(ConnectorService::new(
        connector_repo.clone(),
        company_repo.clone(),
        group_repo.clone(),
    ));
    let pole_screw_service = Arc::new(PoleScrewService::new(
        pole_screw_repo.clone(),
        company_repo.clone(),
    ));
    let utility_pole_service = Arc::new(UtilityPoleService::new(
        utility_pole_repo.clone(),
        company_repo.clone(),
    ));
    let group_service = Arc::new(GroupService::new(
        group_repo.clone(),
        company_repo.clone(),
        material_repo.clone(),
        connector_repo.clone(),
    ));

    let project_service = Arc::new(ProjectService::new(
        project_repo.clone(),
        company_repo.clone(),
        base_repo.clone(),
    ));
    let point_service = Arc::new(PointService::new(
        point_repo.clone(),
        project_repo.clone(),
        utility_pole_repo.clone(),
        group_repo.clone(),
        cable_repo.clone(),
    ));
    let budget_service = Arc::new(BudgetService::new(
        budget_repo,
        project_repo,
        point_repo,
        CatalogRepositories {
            materials: material_repo,
            cables: cable_repo,
            connectors: connector_repo,
            pole_screws: pole_screw_repo,
            utility_poles: utility_pole_repo,
            groups: group_repo,
        },
    ));

    Ok(Arc::new(AppState {
        company_service,
        base_service,
        user_service,
        notification_service,
        material_service,
        cable_service,
        connector_service,
        pole_screw_service,
        utility_pole_service,
        group_service,
        project_service,
        point_service,
        budget_service,
        db_path,
    }))
}
