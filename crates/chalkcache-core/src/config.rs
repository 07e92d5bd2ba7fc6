//! Cache engine configuration.
//!
//! Configuration is read from the environment (with `.env` support via
//! dotenvy), mirroring how the dashboard frontends are pointed at a backend:
//!
//! - `CHALKCACHE_BASE_URL` (falls back to `BACKEND_URL`) - backend base URL
//! - `CHALKCACHE_TIMEOUT_SECS` - per-request timeout
//! - `CHALKCACHE_GRACE_SECS` - retention window for unsubscribed entries

use std::time::Duration;

use anyhow::{Context, Result};

/// Default backend base URL for local development.
const DEFAULT_BASE_URL: &str = "http://localhost:4000";

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Retention window for cache entries with zero subscribers, in seconds.
/// Long enough to absorb rapid unmount/remount cycles during page
/// navigation, short enough that abandoned data does not accumulate.
const GRACE_WINDOW_SECS: u64 = 30;

/// Buffer size for the cache event broadcast channel.
/// 32 covers a full dashboard of concurrently mounted queries with headroom.
const EVENT_CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the dashboard backend, without a trailing slash.
    pub base_url: String,
    /// Timeout applied to every outbound request.
    pub request_timeout: Duration,
    /// How long a zero-subscriber entry is retained before eviction.
    pub grace_window: Duration,
    /// Capacity of the broadcast channel that pushes cache updates.
    pub event_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            grace_window: Duration::from_secs(GRACE_WINDOW_SECS),
            event_capacity: EVENT_CHANNEL_CAPACITY,
        }
    }
}

impl Config {
    /// Load configuration from the environment, falling back to defaults.
    /// A `.env` file is honored if present (silently ignored if not found).
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let base_url = std::env::var("CHALKCACHE_BASE_URL")
            .or_else(|_| std::env::var("BACKEND_URL"))
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let request_timeout = match std::env::var("CHALKCACHE_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(
                raw.parse()
                    .with_context(|| format!("Invalid CHALKCACHE_TIMEOUT_SECS: {}", raw))?,
            ),
            Err(_) => Duration::from_secs(REQUEST_TIMEOUT_SECS),
        };

        let grace_window = match std::env::var("CHALKCACHE_GRACE_SECS") {
            Ok(raw) => Duration::from_secs(
                raw.parse()
                    .with_context(|| format!("Invalid CHALKCACHE_GRACE_SECS: {}", raw))?,
            ),
            Err(_) => Duration::from_secs(GRACE_WINDOW_SECS),
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout,
            grace_window,
            event_capacity: EVENT_CHANNEL_CAPACITY,
        })
    }
}
