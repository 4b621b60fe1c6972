use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
};
use gridbudget_core::{
    cables::NewCable,
    companies::NewCompany,
    groups::{GroupItemKind, NewGroup, NewGroupItem},
    materials::NewMaterial,
    points::NewPoint,
    pole_screws::NewPoleScrew,
    projects::{NewProject, ProjectStatus},
    utility_poles::NewUtilityPole,
    TensionLevel,
};
use gridbudget_server::{api::app_router, build_state, config::Config, AppState};
use rust_decimal_macros::dec;
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

struct TestApp {
    router: axum::Router,
    state: Arc<AppState>,
    _dir: TempDir,
}

async fn build_test_app() -> TestApp {
    let dir = tempdir().unwrap();
    let config = Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: dir.path().join("test.db").to_string_lossy().to_string(),
        request_timeout: Duration::from_secs(10),
        cors_allow_origins: Vec::new(),
    };
    let state = build_state(&config).await.unwrap();
    TestApp {
        router: app_router(state.clone(), &config),
        state,
        _dir: dir,
    }
}

/// Seeds one company with a two-point low-tension project and returns the
/// project id.
///
/// Expected bill: 2 poles at 1000.00, 2 screws at 8.50, 4 clamps at 2.50 and
/// (40 + 30) m x 4 conductors = 280 m of cable at 3.00, total 2867.00.
async fn seed_project(state: &AppState) -> String {
    let company = state
        .company_service
        .create_company(NewCompany {
            id: None,
            name: "Grid Builders".to_string(),
            document: "12.345.678/0001-90".to_string(),
            is_active: true,
        })
        .await
        .unwrap();
    let company_id = company.id.clone();

    let pole = state
        .utility_pole_service
        .create_utility_pole(NewUtilityPole {
            id: None,
            company_id: company_id.clone(),
            code: "p11".to_string(),
            description: "Concrete pole 11 m".to_string(),
            height_m: dec!(11),
            strength_dan: 300,
            min_screw_length_mm: 250,
            unit_price: dec!(1000.00),
        })
        .await
        .unwrap();
    state
        .pole_screw_service
        .create_pole_screw(NewPoleScrew {
            id: None,
            company_id: company_id.clone(),
            code: "PS-300".to_string(),
            description: "Screw 300 mm".to_string(),
            length_mm: 300,
            unit_price: dec!(8.50),
        })
        .await
        .unwrap();
    let clamp = state
        .material_service
        .create_material(NewMaterial {
            id: None,
            company_id: company_id.clone(),
            code: "M1".to_string(),
            description: "Clamp".to_string(),
            unit: "UN".to_string(),
            unit_price: dec!(2.50),
        })
        .await
        .unwrap();
    let cable = state
        .cable_service
        .create_cable(NewCable {
            id: None,
            company_id: company_id.clone(),
            code: "CLT".to_string(),
            description: "Multiplexed 35 mm2".to_string(),
            tension_level: TensionLevel::Low,
            section_mm2: dec!(35),
            unit_price: dec!(3.00),
        })
        .await
        .unwrap();
    let group = state
        .group_service
        .create_group(NewGroup {
            id: None,
            company_id: company_id.clone(),
            code: "B1".to_string(),
            name: "LT tangent".to_string(),
            tension_level: TensionLevel::Low,
            items: vec![
                NewGroupItem {
                    kind: GroupItemKind::Material,
                    reference_id: Some(clamp.id.clone()),
                    quantity: dec!(2),
                    scales_with_phases: false,
                },
                NewGroupItem {
                    kind: GroupItemKind::PoleScrew,
                    reference_id: None,
                    quantity: dec!(1),
                    scales_with_phases: false,
                },
            ],
        })
        .await
        .unwrap();

    let project = state
        .project_service
        .create_project(NewProject {
            id: None,
            company_id,
            base_id: None,
            name: "Rua das Flores".to_string(),
            description: None,
            city: "Campinas".to_string(),
            medium_tension_phases: 3,
            low_tension_phases: 3,
        })
        .await
        .unwrap();

    for (name, span) in [("P1", dec!(40)), ("P2", dec!(30))] {
        state
            .point_service
            .add_point(NewPoint {
                project_id: project.id.clone(),
                name: name.to_string(),
                span_length_m: span,
                utility_pole_id: Some(pole.id.clone()),
                low_tension_group_id: Some(group.id.clone()),
                low_tension_cable_id: Some(cable.id.clone()),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    project.id
}

async fn send(app: &TestApp, method: Method, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn healthz_reports_ok() {
    let app = build_test_app().await;
    let (status, body) = send(&app, Method::GET, "/api/v1/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn calculate_save_and_fetch_latest_budget() {
    let app = build_test_app().await;
    let project_id = seed_project(&app.state).await;

    let (status, budget) = send(
        &app,
        Method::GET,
        &format!("/api/v1/projects/{}/budget", project_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(budget["pointCount"], 2);
    let lines = budget["lines"].as_array().unwrap();
    let codes: Vec<&str> = lines.iter().map(|l| l["code"].as_str().unwrap()).collect();
    assert_eq!(codes, vec!["P11", "CLT", "PS-300", "M1"]);

    let total: rust_decimal::Decimal =
        serde_json::from_value(budget["total"].clone()).unwrap();
    assert_eq!(total, dec!(2867.00));

    let (status, saved) = send(
        &app,
        Method::POST,
        &format!("/api/v1/projects/{}/budgets", project_id),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let saved_id = saved["id"].as_str().unwrap().to_string();

    let (status, latest) = send(
        &app,
        Method::GET,
        &format!("/api/v1/projects/{}/budgets/latest", project_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(latest["id"], saved_id.as_str());

    let (status, list) = send(
        &app,
        Method::GET,
        &format!("/api/v1/projects/{}/budgets", project_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let project = app.state.project_service.get_project(&project_id).unwrap();
    assert_eq!(project.status, ProjectStatus::Budgeted);
}

#[tokio::test]
async fn latest_budget_is_not_found_before_first_save() {
    let app = build_test_app().await;
    let project_id = seed_project(&app.state).await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/projects/{}/budgets/latest", project_id),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn unknown_project_is_not_found() {
    let app = build_test_app().await;
    let (status, _) = send(&app, Method::GET, "/api/v1/projects/missing/budget").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
