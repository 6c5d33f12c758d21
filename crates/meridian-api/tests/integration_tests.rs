//! Integration tests for the Meridian API.
//!
//! Drives the full router (middleware included) with `oneshot`. Each test
//! builds its own state around an in-memory lead sink.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use meridian_api::create_router;
use meridian_api::handlers::{HealthResponse, WhitePaperCatalog};
use meridian_api::state::AppState;
use meridian_core::MeridianConfig;
use meridian_leads::{LeadKind, LeadSink, MemorySink};

// =============================================================================
// Helpers
// =============================================================================

/// Config with rate limiting off so tests don't trip it.
fn test_config() -> MeridianConfig {
    let mut config = MeridianConfig::default();
    config.server.rate_limit_per_sec = 0;
    config
}

fn make_state(config: MeridianConfig, sink: Arc<MemorySink>) -> AppState {
    let sink: Arc<dyn LeadSink> = sink;
    AppState::new(config, sink)
}

/// Router plus a handle on the sink it delivers to.
fn make_app() -> (axum::Router, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    (create_router(make_state(test_config(), Arc::clone(&sink))), sink)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// POST a chat message and return (status, body).
async fn send_chat(app: &axum::Router, message: &str, session: &Value) -> (StatusCode, Value) {
    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/chat",
            json!({ "message": message, "session": session }),
        ))
        .await
        .unwrap();
    let status = resp.status();
    (status, body_json(resp).await)
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_happy_path() {
    let (app, _) = make_app();
    let resp = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
    let health: HealthResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.site, "Meridian Advisory");
    assert_eq!(health.leads_captured, 0);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (app, _) = make_app();
    let resp = app.oneshot(get("/api/nope")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Chat
// =============================================================================

#[tokio::test]
async fn test_chat_scheduler_edge_trigger() {
    let (app, _) = make_app();

    let (status, first) = send_chat(&app, "Can we schedule a call next week?", &Value::Null).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["openScheduler"], true);
    assert_eq!(first["session"]["hasOpenedScheduler"], true);

    let (_, second) = send_chat(&app, "Book another meeting", &first["session"]).await;
    assert!(second.get("openScheduler").is_none());
    assert_eq!(second["session"]["hasOpenedScheduler"], true);
}

#[tokio::test]
async fn test_chat_contact_capture_delivers_lead() {
    let (app, sink) = make_app();

    let (_, first) = send_chat(
        &app,
        "I'd like to contact someone about pricing.",
        &Value::Null,
    )
    .await;
    assert_eq!(first["session"]["awaitingContactEmail"], true);
    assert!(first["session"]["pendingContactSummary"]
        .as_str()
        .unwrap()
        .contains("pricing"));
    assert!(first.get("forwardContact").is_none());
    assert!(sink.is_empty());

    let (status, second) = send_chat(&app, "user@example.com", &first["session"]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["forwardContact"]["email"], "user@example.com");
    assert_eq!(second["forwardContact"]["source"], "chat-assistant");
    assert!(second["forwardContact"]["summary"]
        .as_str()
        .unwrap()
        .contains("pricing"));
    assert_eq!(second["session"]["awaitingContactEmail"], false);
    assert!(second["session"].get("pendingContactSummary").is_none());

    let leads = sink.leads();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].kind, LeadKind::ChatContact);
    assert_eq!(leads[0].email, "user@example.com");

    let resp = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(body_json(resp).await["leads_captured"], 1);
}

#[tokio::test]
async fn test_chat_invalid_email_keeps_waiting() {
    let (app, sink) = make_app();
    let session = json!({
        "awaitingContactEmail": true,
        "pendingContactSummary": "talk to sales"
    });

    let (status, body) = send_chat(&app, "not-an-email", &session).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["awaitingContactEmail"], true);
    assert_eq!(body["session"]["pendingContactSummary"], "talk to sales");
    assert!(body.get("forwardContact").is_none());
    assert!(body["replies"][0].as_str().unwrap().contains("valid email"));
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_chat_sink_failure_still_replies() {
    let sink = Arc::new(MemorySink::failing());
    let app = create_router(make_state(test_config(), sink));
    let session = json!({
        "awaitingContactEmail": true,
        "pendingContactSummary": "talk to sales"
    });

    let (status, body) = send_chat(&app, "user@example.com", &session).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["forwardContact"]["email"], "user@example.com");

    let resp = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(body_json(resp).await["leads_captured"], 0);
}

#[tokio::test]
async fn test_chat_empty_body_prompts() {
    let (app, _) = make_app();
    let resp = app.oneshot(post_json("/api/chat", json!({}))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["replies"].as_array().unwrap().len(), 1);
    assert_eq!(body["session"]["hasOpenedScheduler"], false);
    assert_eq!(body["session"]["awaitingContactEmail"], false);
}

#[tokio::test]
async fn test_chat_non_string_message_is_treated_as_empty() {
    let (app, _) = make_app();
    let empty = app
        .clone()
        .oneshot(post_json("/api/chat", json!({ "message": "" })))
        .await
        .unwrap();
    let numeric = app
        .oneshot(post_json("/api/chat", json!({ "message": 42 })))
        .await
        .unwrap();
    assert_eq!(numeric.status(), StatusCode::OK);
    assert_eq!(body_json(numeric).await["replies"], body_json(empty).await["replies"]);
}

#[tokio::test]
async fn test_chat_malformed_session_is_coerced() {
    let (app, _) = make_app();
    let session = json!({
        "hasOpenedScheduler": "yes",
        "awaitingContactEmail": "true",
        "pendingContactSummary": 7
    });
    let (status, body) = send_chat(&app, "Just browsing around.", &session).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["session"],
        json!({ "hasOpenedScheduler": false, "awaitingContactEmail": false })
    );
}

#[tokio::test]
async fn test_chat_fallback_leaves_session() {
    let (app, _) = make_app();
    let session = json!({ "hasOpenedScheduler": true, "awaitingContactEmail": false });
    let (_, body) = send_chat(&app, "Just browsing around.", &session).await;
    assert_eq!(body["session"], session);
    assert!(body.get("openScheduler").is_none());
}

#[tokio::test]
async fn test_chat_disabled_is_503() {
    let mut config = test_config();
    config.chat.enabled = false;
    let app = create_router(make_state(config, Arc::new(MemorySink::new())));

    let (status, body) = send_chat(&app, "hello", &Value::Null).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "service_unavailable");
}

#[tokio::test]
async fn test_chat_message_too_long_is_400() {
    let mut config = test_config();
    config.chat.max_message_length = 10;
    let app = create_router(make_state(config, Arc::new(MemorySink::new())));

    let (status, body) = send_chat(&app, "this message is too long", &Value::Null).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let (status, _) = send_chat(&app, "short", &Value::Null).await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Lead forms
// =============================================================================

#[tokio::test]
async fn test_contact_form_accepted() {
    let (app, sink) = make_app();
    let resp = app
        .oneshot(post_json(
            "/api/contact",
            json!({
                "name": "Jordan Lee",
                "email": "jordan@northwind.example",
                "company": "Northwind",
                "message": "We'd like a proposal for an operations audit."
            }),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    let body = body_json(resp).await;
    assert_eq!(body["success"], true);

    let leads = sink.leads();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].kind, LeadKind::ContactForm);
    assert_eq!(body["id"], leads[0].id.to_string());
}

#[tokio::test]
async fn test_contact_form_invalid_email_is_422() {
    let (app, sink) = make_app();
    let resp = app
        .oneshot(post_json(
            "/api/contact",
            json!({ "name": "Jordan", "email": "jordan", "message": "hi" }),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "unprocessable_entity");
    assert_eq!(body["details"]["field"], "email");
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_contact_form_sink_failure_is_500() {
    let app = create_router(make_state(test_config(), Arc::new(MemorySink::failing())));
    let resp = app
        .oneshot(post_json(
            "/api/contact",
            json!({ "name": "Jordan", "email": "j@n.io", "message": "hi" }),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(resp).await["error"], "internal_error");
}

#[tokio::test]
async fn test_newsletter_signup() {
    let (app, sink) = make_app();
    let resp = app
        .clone()
        .oneshot(post_json("/api/newsletter", json!({ "email": "reader@example.org" })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    assert_eq!(sink.leads()[0].kind, LeadKind::Newsletter);

    let resp = app
        .oneshot(post_json("/api/newsletter", json!({})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(sink.len(), 1);
}

#[tokio::test]
async fn test_white_paper_download() {
    let (app, sink) = make_app();
    let resp = app
        .oneshot(post_json(
            "/api/white-paper",
            json!({ "email": "cto@startup.io", "paper": "ai-readiness" }),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    let body = body_json(resp).await;
    assert_eq!(body["title"], "The AI Readiness Playbook");
    assert_eq!(body["download_url"], "/downloads/ai-readiness-playbook.pdf");
    assert_eq!(sink.leads()[0].kind, LeadKind::WhitePaper);
}

#[tokio::test]
async fn test_white_paper_unknown_is_404() {
    let (app, sink) = make_app();
    let resp = app
        .oneshot(post_json(
            "/api/white-paper",
            json!({ "email": "cto@startup.io", "paper": "secret-sauce" }),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["error"], "not_found");
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_white_paper_catalog() {
    let (app, _) = make_app();
    let resp = app.oneshot(get("/api/white-papers")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(resp.into_body(), 64 * 1024).await.unwrap();
    let catalog: WhitePaperCatalog = serde_json::from_slice(&bytes).unwrap();
    let slugs: Vec<&str> = catalog.papers.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["ai-readiness", "operations-audit"]);
}

// =============================================================================
// Middleware
// =============================================================================

#[tokio::test]
async fn test_rate_limit_returns_429() {
    let mut config = test_config();
    config.server.rate_limit_per_sec = 1;
    let app = create_router(make_state(config, Arc::new(MemorySink::new())));

    let mut statuses = Vec::new();
    for _ in 0..3 {
        let resp = app.clone().oneshot(get("/api/white-papers")).await.unwrap();
        statuses.push(resp.status());
    }
    // Three requests span at most two one-second windows.
    assert!(statuses.contains(&StatusCode::TOO_MANY_REQUESTS));
}

#[tokio::test]
async fn test_health_is_not_rate_limited() {
    let mut config = test_config();
    config.server.rate_limit_per_sec = 1;
    let app = create_router(make_state(config, Arc::new(MemorySink::new())));

    for _ in 0..5 {
        let resp = app.clone().oneshot(get("/health")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let mut config = test_config();
    config.server.allowed_origins = vec!["https://meridian.example".to_string()];
    let app = create_router(make_state(config, Arc::new(MemorySink::new())));

    let req = Request::builder()
        .method("OPTIONS")
        .uri("/api/chat")
        .header("origin", "https://meridian.example")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("https://meridian.example")
    );
}
