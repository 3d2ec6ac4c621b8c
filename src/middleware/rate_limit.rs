use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use governor::{
    clock::{Clock, DefaultClock},
    state::{InMemoryState, NotKeyed},
    Quota,
};

use crate::config::Config;
use crate::error::AppError;

type DirectLimiter = governor::RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Allows `limit` requests per `window`, replenished continuously
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<DirectLimiter>,
    message: &'static str,
}

impl RateLimiter {
    /// `None` when `limit` or `window` is zero, meaning "unlimited"
    pub fn new(limit: u32, window: Duration, message: &'static str) -> Option<Self> {
        let burst = NonZeroU32::new(limit)?;
        let quota = Quota::with_period(window / limit)?.allow_burst(burst);

        Some(Self {
            limiter: Arc::new(governor::RateLimiter::direct(quota)),
            message,
        })
    }

    /// Takes one permit, or reports roughly how long until one is available
    pub fn check(&self) -> Result<(), Duration> {
        self.limiter
            .check()
            .map_err(|not_until| not_until.wait_time_from(DefaultClock::default().now()))
    }
}

/// Limiters applied to the API routes
#[derive(Clone, Default)]
pub struct RateLimits {
    /// Every request
    pub global: Option<RateLimiter>,
    /// POST, PUT, PATCH and DELETE, on top of `global`
    pub writes: Option<RateLimiter>,
}

impl RateLimits {
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            global: RateLimiter::new(
                config.global_rate_limit,
                Duration::from_secs(config.global_rate_window_secs),
                "Too many requests. Please try again later.",
            ),
            writes: RateLimiter::new(
                config.write_rate_limit,
                Duration::from_secs(config.write_rate_window_secs),
                "Too many write requests. Slow down.",
            ),
        }
    }
}

fn is_write(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

fn enforce(limiter: Option<&RateLimiter>, path: &str) -> Result<(), AppError> {
    let Some(limiter) = limiter else {
        return Ok(());
    };

    limiter.check().map_err(|retry_in| {
        tracing::warn!(
            path = %path,
            retry_in_ms = retry_in.as_millis() as u64,
            "Rate limit exceeded"
        );
        AppError::RateLimited(limiter.message.to_string())
    })
}

/// Rejects with 429 once the relevant bucket is empty
pub async fn rate_limit_middleware(
    State(limits): State<RateLimits>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    enforce(limits.global.as_ref(), &path)?;
    if is_write(request.method()) {
        enforce(limits.writes.as_ref(), &path)?;
    }

    Ok(next.run(request).await)
}
