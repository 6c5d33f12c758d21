//! Meridian API crate - axum HTTP server and route handlers.
//!
//! Serves the site's chat assistant, the contact, newsletter and white-paper
//! lead forms, and a health check.

pub mod error;
pub mod handlers;
pub mod rate_limit;
pub mod routes;
pub mod session;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;
