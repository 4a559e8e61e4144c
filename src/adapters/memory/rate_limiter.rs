//! In-memory rate limiter.
//!
//! Fixed-window counter over a HashMap. Suitable for a single-server
//! deployment; a multi-server fleet needs a shared backend behind the same
//! port.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::Timestamp;
use crate::ports::{RateLimitDecision, RateLimiter};

/// State for a single rate limit window.
#[derive(Debug, Clone)]
struct WindowState {
    count: u32,
    window_start: u64,
}

/// Fixed-window in-memory rate limiter.
#[derive(Debug)]
pub struct FixedWindowRateLimiter {
    max_requests: u32,
    window_secs: u64,
    windows: Arc<RwLock<HashMap<String, WindowState>>>,
}

impl FixedWindowRateLimiter {
    /// Creates a limiter allowing `max_requests` per `window_secs` window.
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs,
            windows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn now_secs() -> u64 {
        Timestamp::now().as_unix_secs()
    }
}

#[async_trait]
impl RateLimiter for FixedWindowRateLimiter {
    async fn check(&self, key: &str) -> RateLimitDecision {
        let now = Self::now_secs();
        let mut windows = self.windows.write().await;

        let state = windows.entry(key.to_string()).or_insert(WindowState {
            count: 0,
            window_start: now,
        });

        // Reset expired windows.
        if now >= state.window_start + self.window_secs {
            state.count = 0;
            state.window_start = now;
        }

        if state.count >= self.max_requests {
            let retry_after =
                (state.window_start + self.window_secs).saturating_sub(now) as u32;
            return RateLimitDecision::Denied {
                retry_after_secs: retry_after.max(1),
            };
        }

        state.count += 1;
        RateLimitDecision::Allowed {
            remaining: self.max_requests.saturating_sub(state.count),
        }
    }
}
