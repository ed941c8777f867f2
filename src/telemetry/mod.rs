pub mod metrics;
pub mod plugins;

pub use self::{
    metrics::{MetricsExporter, MetricsRegistry},
    plugins::ConsolePlugin,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// One forwarded exchange, as the host would hand it to a recorder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRecord {
    pub request_id: Uuid,
    pub timestamp: DateTime<Utc>,

    // Request metadata
    pub forwarder: String,
    pub method: String,
    pub path: String,

    // Outcome
    pub status_code: u16,
    pub persist: bool,
    pub limiter: Option<String>,

    // Timing and size
    pub total_latency: Duration,
    pub request_size: usize,
}

impl Default for ExchangeRecord {
    fn default() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            forwarder: String::new(),
            method: String::new(),
            path: String::new(),
            status_code: 0,
            persist: false,
            limiter: None,
            total_latency: Duration::default(),
            request_size: 0,
        }
    }
}
