use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::routing::get;
use axum::{Router, middleware};
use chrono::TimeDelta;
use sea_orm::DatabaseConnection;
use serde_json::json;
use tower::ServiceExt;

use stockroom_auth_types::cookie::{ACCESS_TOKEN, SESSION_EXPIRED};
use stockroom_auth_types::identity::SessionIdentity;
use stockroom_inventory::middleware::require_session;
use stockroom_inventory::router::build_router;
use stockroom_inventory::state::AppState;
use stockroom_testing::auth::{TestSessions, cookie_header, set_cookie_value};
use stockroom_testing::response::{error_kind, json_body};

/// Router over a disconnected store. Anything that reaches the store fails as unavailable.
fn offline_app(sessions: &TestSessions) -> Router {
    build_router(AppState {
        db: Arc::new(DatabaseConnection::default()),
        sessions: Arc::new(sessions.manager()),
    })
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

// ── Public routes ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_answer_liveness_without_session() {
    let app = offline_app(&TestSessions::default());

    let response = app.oneshot(get_request("/healthz")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn should_report_not_ready_when_store_is_down() {
    let app = offline_app(&TestSessions::default());

    let response = app.oneshot(get_request("/readyz")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_list_locations() {
    let app = offline_app(&TestSessions::default());

    let response = app.oneshot(get_request("/locations")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!(["ALMACÉN 1", "ALMACÉN 2", "SÓTANO"])
    );
}

#[tokio::test]
async fn should_clear_cookie_on_logout() {
    let app = offline_app(&TestSessions::default());

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/session")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        set_cookie_value(&response, ACCESS_TOKEN).as_deref(),
        Some("")
    );
}

#[tokio::test]
async fn should_surface_store_outage_on_login_as_retryable() {
    let app = offline_app(&TestSessions::default());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/session")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"username":"ana","password":"pw"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(error_kind(response).await, "STORE_UNAVAILABLE");
}

// ── Session gate ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_protected_route_without_cookie() {
    let app = offline_app(&TestSessions::default());

    let response = app.oneshot(get_request("/products")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_kind(response).await, "UNAUTHENTICATED");
}

#[tokio::test]
async fn should_reject_tampered_token() {
    let sessions = TestSessions::default();
    let app = offline_app(&sessions);
    let mut token = sessions.token("ana");
    token.push('x');

    let response = app
        .oneshot(
            Request::builder()
                .uri("/movements")
                .header(header::COOKIE, cookie_header(&token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_kind(response).await, "UNAUTHENTICATED");
}

#[tokio::test]
async fn should_expire_idle_session_and_raise_marker() {
    let sessions = TestSessions::default();
    let app = offline_app(&sessions);
    let stale = sessions.idle_token("ana", TimeDelta::minutes(31));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/products")
                .header(header::COOKIE, cookie_header(&stale))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        set_cookie_value(&response, ACCESS_TOKEN).as_deref(),
        Some("")
    );
    assert_eq!(
        set_cookie_value(&response, SESSION_EXPIRED).as_deref(),
        Some("true")
    );
    assert_eq!(error_kind(response).await, "SESSION_EXPIRED");
}

#[tokio::test]
async fn should_refresh_cookie_even_when_handler_fails() {
    let sessions = TestSessions::default();
    let app = offline_app(&sessions);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/products")
                .header(header::COOKIE, sessions.cookie("ana"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let refreshed = set_cookie_value(&response, ACCESS_TOKEN).unwrap();
    assert_eq!(
        sessions.manager().validate(&refreshed).unwrap().subject,
        "ana"
    );
}

#[tokio::test]
async fn should_pass_identity_and_refresh_token() {
    let sessions = TestSessions::default();
    let probe = Router::new()
        .route(
            "/probe",
            get(|identity: SessionIdentity| async move { identity.username }),
        )
        .route_layer(middleware::from_fn_with_state(
            Arc::new(sessions.manager()),
            require_session,
        ));
    let aging = sessions.idle_token("ana", TimeDelta::minutes(20));

    let response = probe
        .oneshot(
            Request::builder()
                .uri("/probe")
                .header(header::COOKIE, cookie_header(&aging))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let refreshed = set_cookie_value(&response, ACCESS_TOKEN).unwrap();
    assert_ne!(refreshed, aging);

    // 20 more idle minutes would have expired the old token, not the refreshed one.
    let later = chrono::Utc::now() + TimeDelta::minutes(20);
    assert!(sessions.manager().validate_at(&refreshed, later).is_ok());
    assert!(sessions.manager().validate_at(&aging, later).is_err());

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"ana");
}
