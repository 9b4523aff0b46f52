//! Rate limiting middleware for the dashboard server
//!
//! Token bucket caps on how often the server calls upstream. The news feed is
//! fetched fresh on every render, so feed routes get the tighter cap:
//! - General routes: api_rate_limit (default 100/s)
//! - Feed routes (`/`, `/api/v1/dashboard`, `/api/v1/sentiment`): feed_rate_limit (default 5/s)
//!
//! There is one bucket per route class shared by all clients, not one per
//! client. A single busy client can exhaust the feed cap for everyone.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use parking_lot::Mutex;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Rate limit type for different endpoint categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateLimitType {
    /// Health, index list, cached history
    General,
    /// Routes that trigger a news feed fetch
    Feed,
}

impl RateLimitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateLimitType::General => "general",
            RateLimitType::Feed => "feed",
        }
    }
}

/// Token bucket rate limiter
#[derive(Debug)]
pub struct TokenBucket {
    /// Maximum tokens (requests) allowed per period
    capacity: u32,
    /// Current available tokens
    tokens: f64,
    /// Tokens added per second
    refill_rate: f64,
    /// Last refill time
    last_refill: Instant,
}

impl TokenBucket {
    pub fn new(rate_per_second: u32) -> Self {
        Self {
            capacity: rate_per_second,
            tokens: rate_per_second as f64,
            refill_rate: rate_per_second as f64,
            last_refill: Instant::now(),
        }
    }

    /// Try to consume a token, returns true if allowed
    pub fn try_acquire(&mut self) -> bool {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill);
        let refill_amount = elapsed.as_secs_f64() * self.refill_rate;

        self.tokens = (self.tokens + refill_amount).min(self.capacity as f64);
        self.last_refill = now;

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Get time until a token will be available
    pub fn time_until_available(&self) -> Duration {
        if self.tokens >= 1.0 || self.refill_rate <= 0.0 {
            Duration::ZERO
        } else {
            let tokens_needed = 1.0 - self.tokens;
            Duration::from_secs_f64(tokens_needed / self.refill_rate)
        }
    }
}

/// Shared rate limiter state
#[derive(Debug)]
pub struct RateLimiterState {
    limiters: Mutex<HashMap<RateLimitType, TokenBucket>>,
}

impl RateLimiterState {
    pub fn new(api_rate: u32, feed_rate: u32) -> Self {
        let mut limiters = HashMap::new();
        limiters.insert(RateLimitType::General, TokenBucket::new(api_rate));
        limiters.insert(RateLimitType::Feed, TokenBucket::new(feed_rate));

        Self {
            limiters: Mutex::new(limiters),
        }
    }

    /// Try to acquire a token for the given rate limit type
    pub fn try_acquire(&self, rate_type: RateLimitType) -> bool {
        let mut limiters = self.limiters.lock();
        match limiters.get_mut(&rate_type) {
            Some(limiter) => limiter.try_acquire(),
            None => true,
        }
    }

    /// Get time until rate limit allows a request
    pub fn time_until_available(&self, rate_type: RateLimitType) -> Duration {
        let limiters = self.limiters.lock();
        limiters
            .get(&rate_type)
            .map(TokenBucket::time_until_available)
            .unwrap_or(Duration::ZERO)
    }
}

/// Determine rate limit type based on request path
pub fn get_rate_limit_type(path: &str) -> RateLimitType {
    match path {
        "/" | "/api/v1/dashboard" | "/api/v1/sentiment" => RateLimitType::Feed,
        _ => RateLimitType::General,
    }
}

/// Rate limiting middleware
pub async fn rate_limit_middleware(
    State(state): State<Arc<RateLimiterState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let rate_type = get_rate_limit_type(&path);

    if !state.try_acquire(rate_type) {
        let wait_time = state.time_until_available(rate_type);
        tracing::warn!(
            "Rate limit exceeded for {:?}, path: {}, retry after {:?}ms",
            rate_type,
            path,
            wait_time.as_millis()
        );
        return rate_limit_response(wait_time, rate_type);
    }

    next.run(request).await
}

/// Create a rate limit exceeded response
fn rate_limit_response(retry_after: Duration, rate_type: RateLimitType) -> Response {
    let retry_seconds = retry_after.as_secs_f64().ceil().max(1.0) as u64;

    let body = Json(json!({
        "status": "error",
        "error_type": "rate_limit_exceeded",
        "message": format!(
            "Rate limit exceeded for {}. Please retry after {} seconds.",
            rate_type.as_str(),
            retry_seconds
        ),
        "retry_after_ms": retry_after.as_millis() as u64
    }));

    let mut response = (StatusCode::TOO_MANY_REQUESTS, body).into_response();

    response
        .headers_mut()
        .insert("Retry-After", HeaderValue::from(retry_seconds));
    response.headers_mut().insert(
        "X-RateLimit-Type",
        HeaderValue::from_static(rate_type.as_str()),
    );

    response
}
