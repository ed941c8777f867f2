use once_cell::sync::Lazy;
use std::time::Duration;

/// Shared upstream client. No request timeout is set here; callers inherit
/// reqwest's defaults.
pub static CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .pool_idle_timeout(Duration::from_secs(30))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .unwrap_or_else(|e| {
            tracing::error!("Failed to build configured HTTP client, using defaults: {}", e);
            reqwest::Client::new()
        })
});
