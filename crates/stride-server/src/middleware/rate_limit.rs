//! Per-client request limiting.
//!
//! Fixed-window counter keyed by the peer IP address. Requests past the
//! window's allowance get 429 with a `Retry-After` hint until the window
//! rolls over.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::http::header::RETRY_AFTER;
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::state::AppState;

/// Key used when the peer address is not known.
const UNKNOWN_CLIENT: &str = "unknown";

/// Buckets are swept for expired windows once the map grows past this.
const SWEEP_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub max_requests: u64,
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::from_secs(15 * 60),
        }
    }
}

#[derive(Debug)]
struct Bucket {
    count: u64,
    window_start: Instant,
}

/// Outcome of counting one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// Rejected; the window resets after this long.
    Reject(Duration),
}

#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    buckets: Arc<Mutex<HashMap<String, Bucket>>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            buckets: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn config(&self) -> RateLimitConfig {
        self.config
    }

    /// Count a request from `key` at `now`.
    pub async fn check_at(&self, key: &str, now: Instant) -> Decision {
        let mut buckets = self.buckets.lock().await;
        let window = self.config.window;

        if buckets.len() > SWEEP_THRESHOLD {
            buckets.retain(|_, b| now.duration_since(b.window_start) < window);
        }

        let bucket = buckets.entry(key.to_string()).or_insert(Bucket {
            count: 0,
            window_start: now,
        });

        let elapsed = now.duration_since(bucket.window_start);
        if elapsed >= window {
            bucket.count = 0;
            bucket.window_start = now;
        }

        if bucket.count >= self.config.max_requests {
            Decision::Reject(window.saturating_sub(now.duration_since(bucket.window_start)))
        } else {
            bucket.count += 1;
            Decision::Allow
        }
    }

    pub async fn check(&self, key: &str) -> Decision {
        self.check_at(key, Instant::now()).await
    }
}

#[derive(Serialize)]
struct LimitBody {
    error: &'static str,
    message: &'static str,
}

pub async fn rate_limit(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let key = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string());

    match state.rate_limiter.check(&key).await {
        Decision::Allow => next.run(req).await,
        Decision::Reject(retry_after) => {
            tracing::warn!(client = %key, "rate limit exceeded");
            let mut response = (
                StatusCode::TOO_MANY_REQUESTS,
                Json(LimitBody {
                    error: "Too many requests",
                    message: "Too many requests from this IP, please try again later.",
                }),
            )
                .into_response();
            // Round up so clients never retry a moment too early.
            let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(secs.max(1)));
            response
        }
    }
}
