use axum::{
    body::{to_bytes, Body, Bytes},
    http::{HeaderMap, HeaderValue, Method, Response, Uri},
};
use docintel_forwarder::{
    config::{AppConfig, CredentialCache, DocIntelligenceCredentials},
    context::RequestContext,
    forwarder::DocumentIntelligenceForwarder,
};
use std::sync::Arc;
use wiremock::MockServer;

pub const SIMULATOR_KEY: &str = "simulator-key";
pub const UPSTREAM_KEY: &str = "upstream-key-0123456789";

pub const ANALYZE_PATH: &str = "/formrecognizer/documentModels/prebuilt-read:analyze";
pub const ANALYZE_RESULTS_PATH: &str =
    "/formrecognizer/documentModels/prebuilt-read/analyzeResults/3b1c7a0e";
pub const API_VERSION_QUERY: &str = "api-version=2023-07-31";

pub fn app_config() -> Arc<AppConfig> {
    Arc::new(AppConfig::with_api_key(SIMULATOR_KEY))
}

/// Forwarder whose upstream is the given mock server. The endpoint carries a
/// trailing slash, as Azure portal endpoints do.
pub fn forwarder_for(server: &MockServer) -> DocumentIntelligenceForwarder {
    let credentials =
        DocIntelligenceCredentials::new(UPSTREAM_KEY, format!("{}/", server.uri()));
    DocumentIntelligenceForwarder::new(
        reqwest::Client::new(),
        Arc::new(CredentialCache::preloaded(Some(credentials))),
    )
}

pub fn forwarder_without_credentials() -> DocumentIntelligenceForwarder {
    DocumentIntelligenceForwarder::new(
        reqwest::Client::new(),
        Arc::new(CredentialCache::preloaded(None)),
    )
}

pub fn request_context(
    method: Method,
    path_and_query: &str,
    subscription_key: Option<&str>,
    body: &'static [u8],
) -> RequestContext {
    let mut headers = HeaderMap::new();
    if let Some(key) = subscription_key {
        headers.insert(
            "ocp-apim-subscription-key",
            HeaderValue::from_str(key).unwrap(),
        );
    }
    headers.insert("content-type", HeaderValue::from_static("application/json"));

    RequestContext::new(
        method,
        path_and_query.parse::<Uri>().unwrap(),
        headers,
        Bytes::from_static(body),
        app_config(),
    )
}

pub async fn read_body(response: Response<Body>) -> Bytes {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body")
}
