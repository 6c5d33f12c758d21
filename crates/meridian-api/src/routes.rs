//! Router setup with all API routes and middleware.
//!
//! Configures the axum Router with CORS, tracing, compression, rate
//! limiting and all endpoint handlers.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use meridian_core::{MeridianConfig, MeridianError};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::rate_limit::{rate_limit_middleware, RateLimiter};
use crate::state::AppState;

/// Request bodies are small JSON forms.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Create the axum Router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.allowed_origins);
    let limiter = RateLimiter::new(state.config.server.rate_limit_per_sec);

    let public_routes = Router::new().route("/health", get(handlers::health));

    let api_routes = Router::new()
        .route("/api/chat", post(handlers::chat))
        .route("/api/contact", post(handlers::contact))
        .route("/api/newsletter", post(handlers::newsletter))
        .route("/api/white-paper", post(handlers::white_paper))
        .route("/api/white-papers", get(handlers::white_papers))
        .layer(axum::middleware::from_fn(rate_limit_middleware))
        .layer(axum::Extension(limiter));

    public_routes
        .merge(api_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// CORS for the marketing site's origins. Unparseable origins are skipped.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

/// Start the HTTP server on the configured address.
pub async fn start_server(config: &MeridianConfig, state: AppState) -> meridian_core::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| MeridianError::Server(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!(addr = %addr, "API server listening");

    axum::serve(listener, router)
        .await
        .map_err(|e| MeridianError::Server(format!("Server error: {}", e)))?;

    Ok(())
}
