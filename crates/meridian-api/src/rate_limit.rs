//! Fixed-window rate limiter middleware.
//!
//! Limits requests to a configurable number per second. The window and its
//! count share one atomic word so a new second is opened and counted in a
//! single compare-and-swap. Applied as an axum middleware on the `/api`
//! routes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Shared state for the rate limiter.
#[derive(Clone)]
pub struct RateLimiter {
    /// Maximum requests allowed per second. Zero disables limiting.
    max_per_sec: u64,
    /// Epoch second of the active window in the high 32 bits, requests
    /// counted in it in the low 32 bits.
    state: Arc<AtomicU64>,
}

const COUNT_MASK: u64 = 0xFFFF_FFFF;

fn pack(window: u64, count: u64) -> u64 {
    (window << 32) | count
}

impl RateLimiter {
    /// Create a new rate limiter allowing `max_per_sec` requests per second.
    pub fn new(max_per_sec: u64) -> Self {
        Self {
            max_per_sec: max_per_sec.min(COUNT_MASK),
            state: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Try to acquire a permit. Returns true if the request is allowed.
    pub fn try_acquire(&self) -> bool {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        self.try_acquire_at(now)
    }

    fn try_acquire_at(&self, now: u64) -> bool {
        if self.max_per_sec == 0 {
            return true;
        }

        let window = now & COUNT_MASK;
        self.state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                let count = current & COUNT_MASK;
                if current >> 32 != window {
                    Some(pack(window, 1))
                } else if count < self.max_per_sec {
                    Some(pack(window, count + 1))
                } else {
                    None
                }
            })
            .is_ok()
    }
}

/// Axum middleware that enforces the rate limit.
pub async fn rate_limit_middleware(
    axum::extract::Extension(limiter): axum::extract::Extension<RateLimiter>,
    req: Request,
    next: Next,
) -> Response {
    if limiter.try_acquire() {
        next.run(req).await
    } else {
        tracing::debug!(path = %req.uri().path(), "Request rate limited");
        (
            StatusCode::TOO_MANY_REQUESTS,
            Json(serde_json::json!({
                "error": "too_many_requests",
                "message": "Rate limit exceeded"
            })),
        )
            .into_response()
    }
}
