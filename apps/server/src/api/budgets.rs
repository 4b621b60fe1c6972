use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use gridbudget_core::budgets::{Budget, BudgetComparison, BudgetSnapshot};
use gridbudget_core::Error;
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};

async fn calculate_budget(
    Path(project_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Budget>> {
    let budget = state.budget_service.calculate_budget(&project_id)?;
    Ok(Json(budget))
}

async fn save_budget(
    Path(project_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<(StatusCode, Json<BudgetSnapshot>)> {
    let snapshot = state.budget_service.save_budget(&project_id).await?;
    tracing::info!(
        "Saved budget {} for project {} (total {})",
        snapshot.id,
        project_id,
        snapshot.total
    );
    Ok((StatusCode::CREATED, Json(snapshot)))
}

async fn list_budgets(
    Path(project_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<BudgetSnapshot>>> {
    let budgets = state.budget_service.list_budgets(&project_id)?;
    Ok(Json(budgets))
}

async fn get_latest_budget(
    Path(project_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BudgetSnapshot>> {
    let latest = state
        .budget_service
        .get_latest_budget(&project_id)?
        .ok_or_else(|| Error::not_found("Saved budget for project", &project_id))?;
    Ok(Json(latest))
}

async fn get_budget(
    Path(budget_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BudgetSnapshot>> {
    let budget = state.budget_service.get_budget(&budget_id)?;
    Ok(Json(budget))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompareQuery {
    base: String,
    other: String,
}

async fn compare_budgets(
    Query(query): Query<CompareQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BudgetComparison>> {
    let comparison = state
        .budget_service
        .compare_budgets(&query.base, &query.other)?;
    Ok(Json(comparison))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/projects/{id}/budget", get(calculate_budget))
        .route(
            "/projects/{id}/budgets",
            get(list_budgets).post(save_budget),
        )
        .route("/projects/{id}/budgets/latest", get(get_latest_budget))
        .route("/budgets/compare", get(compare_budgets))
        .route("/budgets/{id}", get(get_budget))
}
