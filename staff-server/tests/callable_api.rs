//! HTTP-level tests: routing, caller identity, envelope and status mapping

mod common;

use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use common::*;
use staff_server::ServerState;
use staff_server::api::build_app;

async fn call(
    app: &Router,
    name: &str,
    body: impl Into<Body>,
    authorization: Option<&str>,
) -> (StatusCode, Value) {
    let mut request = Request::builder()
        .method(Method::POST)
        .uri(format!("/api/callable/{name}"))
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(value) = authorization {
        request = request.header(header::AUTHORIZATION, value);
    }

    let response = app
        .clone()
        .oneshot(request.body(body.into()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

async fn call_json(
    app: &Router,
    name: &str,
    payload: Value,
    authorization: Option<&str>,
) -> (StatusCode, Value) {
    call(app, name, payload.to_string(), authorization).await
}

async fn app() -> (ServerState, Router) {
    let state = test_state().await;
    let app = build_app(&state);
    (state, app)
}

#[tokio::test]
async fn verify_returns_success_envelope() {
    let (state, app) = app().await;
    create_employee(&state, employee_data("E100", "12345", "Ana", "Ops")).await;

    let (status, body) = call_json(&app, "verifyEmployeeCode", json!({ "employeeCode": "E100" }), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"], json!({ "exists": true, "employeeCode": "E100" }));
    assert!(body.get("status").is_none());
}

#[tokio::test]
async fn authenticate_over_http() {
    let (state, app) = app().await;
    let mut data = employee_data("E100", "12345", "Ada", "HR");
    data.email = "admin@example.com".into();
    create_employee(&state, data).await;

    let (status, body) = call_json(
        &app,
        "authenticateEmployee",
        json!({ "employeeCode": "E100", "cedula": "12345" }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["success"], true);
    assert_eq!(body["data"]["user"]["id"], ADMIN_UID);
    assert_eq!(body["data"]["employee"]["employeeCode"], "E100");

    let (status, body) = call_json(
        &app,
        "authenticateEmployee",
        json!({ "employeeCode": "E100", "cedula": "00000" }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 8001);
    assert_eq!(body["status"], "not-found");
}

#[tokio::test]
async fn unknown_callable_is_not_found() {
    let (_state, app) = app().await;

    let (status, body) = call_json(&app, "deleteEmployee", json!({}), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 8101);
    assert_eq!(body["status"], "not-found");
    assert_eq!(body["details"]["callable"], "deleteEmployee");
}

#[tokio::test]
async fn malformed_body_is_invalid_argument() {
    let (_state, app) = app().await;

    for payload in ["{not json", "[1, 2]", r#"{"employeeCode": 42}"#] {
        let (status, body) = call(&app, "verifyEmployeeCode", payload, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {payload}");
        assert_eq!(body["status"], "invalid-argument");
    }
}

#[tokio::test]
async fn empty_body_reaches_the_operation() {
    let (_state, app) = app().await;

    let (status, body) = call(&app, "verifyEmployeeCode", "", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 7);
    assert_eq!(body["message"], "Employee code is required");
    assert_eq!(body["details"]["fields"], json!(["employeeCode"]));
}

#[tokio::test]
async fn anonymous_admin_call_is_unauthenticated() {
    let (_state, app) = app().await;

    let (status, body) = call_json(
        &app,
        "createEmployee",
        json!({ "employeeData": { "employeeCode": "E1", "cedula": "1" } }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);
    assert_eq!(body["status"], "unauthenticated");
}

#[tokio::test]
async fn bad_tokens_are_rejected() {
    let (state, app) = app().await;

    let (status, body) = call_json(&app, "getEmployees", json!({}), Some("Bearer not-a-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1004);

    let expired = state
        .get_jwt_service()
        .generate_token_valid_for(ADMIN_UID, None, -chrono::Duration::hours(2))
        .unwrap();
    let (status, body) = call_json(
        &app,
        "getEmployees",
        json!({}),
        Some(&format!("Bearer {expired}")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1003);

    // A bad token is rejected even on public operations
    let (status, _) = call_json(
        &app,
        "verifyEmployeeCode",
        json!({ "employeeCode": "E1" }),
        Some("Bearer not-a-token"),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_can_create_and_list() {
    let (state, app) = app().await;
    let token = bearer(&state, ADMIN_UID);

    let (status, body) = call_json(
        &app,
        "createEmployee",
        json!({
            "employeeData": {
                "employeeCode": "E100",
                "cedula": "12345",
                "name": "Ana",
                "email": "ana@example.com",
                "department": "Ops",
                "position": "Clerk",
                "phone": "555-0100"
            }
        }),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["success"], true);
    let id = body["data"]["employeeId"].as_str().unwrap().to_string();

    let (status, body) = call_json(&app, "getEmployees", json!({ "department": "Ops" }), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["employees"][0]["id"], id);
    assert_eq!(body["data"]["employees"][0]["isActive"], true);

    let (status, body) = call_json(
        &app,
        "createEmployee",
        json!({ "employeeData": { "employeeCode": "E100", "cedula": "99999" } }),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "already-exists");
    assert_eq!(body["code"], 8002);
}

#[tokio::test]
async fn non_admin_token_is_permission_denied() {
    let (state, app) = app().await;
    let token = bearer(&state, CLERK_UID);

    let (status, body) = call_json(&app, "getEmployees", json!({}), Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["status"], "permission-denied");
    assert_eq!(body["message"], "Only administrators can list employees");
}

#[tokio::test]
async fn health_reports_database() {
    let (_state, app) = app().await;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["database"]["status"], "ok");
}

#[tokio::test]
async fn responses_carry_request_id() {
    let (_state, app) = app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/callable/verifyEmployeeCode")
                .body(Body::from(r#"{"employeeCode":"E1"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/callable/verifyEmployeeCode")
                .header("x-request-id", "client-chosen-id")
                .body(Body::from(r#"{"employeeCode":"E1"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "client-chosen-id");
}
