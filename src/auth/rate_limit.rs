use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Message returned on every rejection; no per-request computation.
pub const RATE_LIMIT_MESSAGE: &str =
    "Too many requests from this client. Please wait until the current window resets.";

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub window: Duration,
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window: Duration::minutes(15),
            max_requests: 10,
        }
    }
}

#[derive(Debug)]
struct WindowCounter {
    count: u32,
    window_start: DateTime<Utc>,
}

#[derive(Debug)]
pub enum Admission {
    Allowed,
    Rejected { retry_after: Duration },
}

/// Fixed-window request gate keyed by client network identity. The counter
/// table is shared mutable state; increments happen under the write lock so
/// concurrent requests from one client cannot undercount.
pub struct RateLimiter {
    windows: Arc<RwLock<HashMap<String, WindowCounter>>>,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            windows: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    pub async fn admit(&self, client: &str) -> Admission {
        let mut windows = self.windows.write().await;
        let now = Utc::now();

        let counter = windows.entry(client.to_string()).or_insert(WindowCounter {
            count: 0,
            window_start: now,
        });

        // Implicit reset once the window has elapsed.
        if now - counter.window_start >= self.config.window {
            counter.count = 0;
            counter.window_start = now;
        }

        if counter.count < self.config.max_requests {
            counter.count += 1;
            Admission::Allowed
        } else {
            Admission::Rejected {
                retry_after: counter.window_start + self.config.window - now,
            }
        }
    }

    /// Drops counters whose window has elapsed. Keeps the table from growing
    /// with every client identity ever seen.
    pub async fn sweep(&self) {
        let mut windows = self.windows.write().await;
        let now = Utc::now();
        windows.retain(|_, counter| now - counter.window_start < self.config.window);
    }

    #[cfg(test)]
    async fn tracked_clients(&self) -> usize {
        self.windows.read().await.len()
    }
}
