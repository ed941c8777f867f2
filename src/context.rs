use crate::config::AppConfig;
use axum::http::{HeaderMap, Method, Uri};
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;

/// Key in [`RequestContext::values`] naming the rate limiter the host should apply.
pub const SIMULATOR_KEY_LIMITER: &str = "Simulator-Limiter";

#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
    pub config: Arc<AppConfig>,
    pub values: HashMap<String, String>,
}

impl RequestContext {
    pub fn new(
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            method,
            uri,
            headers,
            body,
            config,
            values: HashMap::new(),
        }
    }

    pub fn path(&self) -> &str {
        self.uri.path()
    }

    pub fn query(&self) -> Option<&str> {
        self.uri.query()
    }

    pub fn limiter(&self) -> Option<&str> {
        self.values.get(SIMULATOR_KEY_LIMITER).map(String::as_str)
    }
}
