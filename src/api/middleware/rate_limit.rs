//! Fixed-window request quota per route and client address.

use axum::{
    extract::{ConnectInfo, MatchedPath, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::api::errors::ApiError;

/// Tracked keys above which expired windows are swept
const SWEEP_THRESHOLD: usize = 10_000;

struct Window {
    started: Instant,
    count: u32,
}

struct Windows {
    by_key: HashMap<String, Window>,
    last_sweep: Instant,
}

/// Process-local counter of requests per key and time window
pub struct RateLimiter {
    limit: u32,
    period: Duration,
    windows: Mutex<Windows>,
}

impl RateLimiter {
    pub fn new(limit: u32, period: Duration) -> Self {
        Self {
            limit,
            period,
            windows: Mutex::new(Windows {
                by_key: HashMap::new(),
                last_sweep: Instant::now(),
            }),
        }
    }

    /// Allows `limit` requests per key every minute
    pub fn per_minute(limit: u32) -> Self {
        Self::new(limit, Duration::from_secs(60))
    }

    /// Records a request for `key`; false once the quota is spent
    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);

        // At most one sweep per period
        if windows.by_key.len() > SWEEP_THRESHOLD
            && now.saturating_duration_since(windows.last_sweep) >= self.period
        {
            let period = self.period;
            windows
                .by_key
                .retain(|_, window| now.saturating_duration_since(window.started) < period);
            windows.last_sweep = now;
        }

        let window = windows.by_key.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.saturating_duration_since(window.started) >= self.period {
            window.started = now;
            window.count = 0;
        }

        if window.count >= self.limit {
            return false;
        }
        window.count += 1;
        true
    }

    #[cfg(test)]
    fn tracked_keys(&self) -> usize {
        self.windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .by_key
            .len()
    }

    fn describe(&self) -> String {
        let seconds = self.period.as_secs();
        if seconds % 60 == 0 {
            format!("{} per {} minute", self.limit, seconds / 60)
        } else {
            format!("{} per {} second", self.limit, seconds)
        }
    }
}

/// Middleware enforcing the quota of each matched route
///
/// Install with `route_layer` so the route template is known.
pub async fn rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    let client = connect_info
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| route_key(path.as_str()).to_string())
        .unwrap_or_else(|| route_key(request.uri().path()).to_string());
    let key = format!("{} {}|{}", request.method(), route, client);

    if limiter.check(&key) {
        next.run(request).await
    } else {
        tracing::warn!(client = %client, route = %route, "Rate limit exceeded");
        ApiError::too_many_requests(format!("Rate limit exceeded: {}", limiter.describe()))
            .into_response()
    }
}

/// `/students` and `/students/` share one quota
fn route_key(route: &str) -> &str {
    match route.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}
