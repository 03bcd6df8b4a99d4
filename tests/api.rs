use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use dinamizar_service::app::{RouterOptions, build_router};
use dinamizar_service::entities::sea_orm_active_enums::UserRole;
use dinamizar_service::session::{Identity, StaticIdentityProvider};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

const MASTER_TOKEN: &str = "master-token";
const LEADER_TOKEN: &str = "leader-token";
const EMPLOYEE_TOKEN: &str = "employee-token";

fn identity(email: &str, role: UserRole) -> Identity {
    Identity {
        user_id: Uuid::new_v4(),
        email: email.to_string(),
        name: email.split('@').next().unwrap_or_default().to_string(),
        role,
        employee_id: None,
    }
}

/// Router without storage: reads come back empty and writes are refused.
fn app() -> Router {
    let provider = StaticIdentityProvider::new()
        .with_token(MASTER_TOKEN, identity("master@example.com", UserRole::Master))
        .with_token(LEADER_TOKEN, identity("leader@example.com", UserRole::Leader))
        .with_token(EMPLOYEE_TOKEN, identity("ana@example.com", UserRole::Employee));

    build_router(
        Arc::new(provider),
        RouterOptions {
            cors_allowed_origins: "*",
            swagger_enabled: false,
            app_env: "test",
        },
    )
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn send_json(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn four_competency_sheet() -> Value {
    let entries: Vec<Value> = [(25, 5), (25, 4), (25, 3), (25, 2)]
        .into_iter()
        .map(|(weight, rating)| {
            json!({ "competency_id": Uuid::new_v4(), "weight": weight, "rating": rating })
        })
        .collect();
    json!({ "entries": entries })
}

#[tokio::test]
async fn health_reports_missing_storage() {
    let response = app().oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "unavailable");
}

#[tokio::test]
async fn protected_routes_require_a_session() {
    let response = app()
        .oneshot(get("/api/v1/employees", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app()
        .oneshot(get("/api/v1/employees", Some("forged")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_cookie_is_accepted() {
    let request = Request::builder()
        .uri("/api/v1/auth/me")
        .header(header::COOKIE, format!("app_session_id={LEADER_TOKEN}"))
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["email"], "leader@example.com");
    assert_eq!(body["role"], "leader");
}

#[tokio::test]
async fn lists_are_empty_without_storage() {
    for uri in [
        "/api/v1/employees",
        "/api/v1/competencies",
        "/api/v1/positions",
        "/api/v1/cycles",
        "/api/v1/evaluations",
        "/api/v1/pdis",
        "/api/v1/nine-box",
    ] {
        let response = app().oneshot(get(uri, Some(EMPLOYEE_TOKEN))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        let body = body_json(response).await;
        assert_eq!(body["total"], 0, "{uri}");
    }
}

#[tokio::test]
async fn missing_record_is_not_found() {
    let uri = format!("/api/v1/employees/{}", Uuid::new_v4());
    let response = app().oneshot(get(&uri, Some(MASTER_TOKEN))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn writes_are_refused_without_storage() {
    let response = app()
        .oneshot(send_json(
            "POST",
            "/api/v1/competencies",
            Some(MASTER_TOKEN),
            json!({ "name": "Negotiation", "category": "Soft Skill (Relacional)" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn catalog_writes_are_master_only() {
    let response = app()
        .oneshot(send_json(
            "POST",
            "/api/v1/competencies",
            Some(LEADER_TOKEN),
            json!({ "name": "Negotiation", "category": "Soft Skill (Relacional)" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn employees_cannot_score_evaluations() {
    let uri = format!("/api/v1/evaluations/{}/scores", Uuid::new_v4());
    let response = app()
        .oneshot(send_json("PUT", &uri, Some(EMPLOYEE_TOKEN), four_competency_sheet()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn out_of_range_rating_is_rejected_before_storage() {
    let uri = format!("/api/v1/evaluations/{}/scores", Uuid::new_v4());
    let body = json!({
        "entries": [{ "competency_id": Uuid::new_v4(), "weight": 100, "rating": 6 }],
        "submit": true
    });
    let response = app()
        .oneshot(send_json("PUT", &uri, Some(LEADER_TOKEN), body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn preview_scores_a_complete_sheet() {
    let response = app()
        .oneshot(send_json(
            "POST",
            "/api/v1/scoring/preview",
            Some(EMPLOYEE_TOKEN),
            four_competency_sheet(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["total_score"], "3.50");
    assert_eq!(body["total_weight"], 100);
    assert_eq!(body["remaining_credits"], 0);
    assert_eq!(body["is_complete"], true);
    assert!(body["validation_message"].is_null());
    assert_eq!(body["entries"][0]["weighted_score"], "1.25");
}

#[tokio::test]
async fn preview_flags_missing_credits() {
    let body = json!({
        "entries": [{ "competency_id": Uuid::new_v4(), "weight": 20, "rating": 4 }]
    });
    let response = app()
        .oneshot(send_json("POST", "/api/v1/scoring/preview", Some(LEADER_TOKEN), body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["total_score"], "0.80");
    assert_eq!(body["is_complete"], false);
    assert_eq!(body["remaining_credits"], 80);
    assert!(
        body["validation_message"]
            .as_str()
            .unwrap()
            .contains("80 credits")
    );
}

#[tokio::test]
async fn unknown_fields_are_rejected() {
    let response = app()
        .oneshot(send_json(
            "POST",
            "/api/v1/cycles",
            Some(MASTER_TOKEN),
            json!({
                "name": "2025",
                "start_date": "2025-01-01",
                "end_date": "2025-12-31",
                "budget": 10
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn nine_box_values_outside_the_grid_are_rejected() {
    let uri = format!("/api/v1/evaluations/{}/nine-box", Uuid::new_v4());
    let response = app()
        .oneshot(send_json(
            "PUT",
            &uri,
            Some(LEADER_TOKEN),
            json!({ "performance": 4, "potential": 2 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn empty_grid_still_has_nine_cells() {
    let response = app()
        .oneshot(get("/api/v1/nine-box/grid", Some(MASTER_TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["cells"].as_array().unwrap().len(), 9);
}

#[tokio::test]
async fn dashboard_falls_back_to_zeros() {
    let response = app()
        .oneshot(get("/api/v1/dashboard/stats", Some(LEADER_TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["total_employees"], 0);
    assert_eq!(body["recent_evaluations"], json!([]));
}

#[tokio::test]
async fn csv_report_without_records_is_only_the_header() {
    let response = app()
        .oneshot(get("/api/v1/reports/employees", Some(MASTER_TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"dinamizar-employees.csv\""
    );

    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert_eq!(
        body,
        "Name,Badge,Sector,Email,Position,Leader,Access Level,Admission Date\n"
    );
}

#[tokio::test]
async fn text_report_says_when_empty() {
    let response = app()
        .oneshot(get("/api/v1/reports/nine-box?format=txt", Some(MASTER_TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(body.contains("No records."));
}

#[tokio::test]
async fn unknown_report_is_not_found() {
    let response = app()
        .oneshot(get("/api/v1/reports/salaries", Some(MASTER_TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn login_without_storage_is_rejected() {
    let response = app()
        .oneshot(send_json(
            "POST",
            "/api/v1/auth/login",
            None,
            json!({ "email": "master@example.com", "password": "secret" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
