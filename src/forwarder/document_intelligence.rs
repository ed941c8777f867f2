use super::headers::{forward_headers, rewrite_operation_location, strip_response_headers};
use super::{ForwardResult, Forwarder};
use crate::auth::validate_api_key_header;
use crate::config::CredentialCache;
use crate::context::{RequestContext, SIMULATOR_KEY_LIMITER};
use crate::error::AppError;
use crate::proxy::{send_upstream_request, CLIENT};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Response, StatusCode},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

pub const PATH_PREFIX: &str = "/formrecognizer/";
pub const SUBSCRIPTION_KEY_HEADER: &str = "ocp-apim-subscription-key";
pub const LIMITER_NAME: &str = "docintelligence";

const ANALYZE_RESULTS_SEGMENT: &str = "analyzeResults";

/// Relays Azure Document Intelligence (Form Recognizer) calls to a real
/// resource, signing them with the server-held key.
pub struct DocumentIntelligenceForwarder {
    client: reqwest::Client,
    credentials: Arc<CredentialCache>,
}

impl DocumentIntelligenceForwarder {
    pub fn new(client: reqwest::Client, credentials: Arc<CredentialCache>) -> Self {
        Self {
            client,
            credentials,
        }
    }

    pub fn from_env() -> Self {
        Self::new(CLIENT.clone(), Arc::new(CredentialCache::from_env()))
    }
}

#[async_trait]
impl Forwarder for DocumentIntelligenceForwarder {
    fn name(&self) -> &str {
        "document_intelligence"
    }

    async fn handle(
        &self,
        context: &mut RequestContext,
    ) -> Result<Option<ForwardResult>, AppError> {
        if !context.path().starts_with(PATH_PREFIX) {
            return Ok(None);
        }

        validate_api_key_header(
            &context.headers,
            SUBSCRIPTION_KEY_HEADER,
            &context.config.simulator_api_key,
        )?;

        debug!(path = context.path(), "Forwarding Document Intelligence request");

        let Some(credentials) = self.credentials.get() else {
            return Ok(None);
        };

        let url = upstream_url(&credentials.endpoint, context.path(), context.query());
        let headers = forward_headers(&context.headers, &credentials.api_key)?;

        let upstream = send_upstream_request(
            &self.client,
            context.method.clone(),
            &url,
            headers,
            context.body.clone(),
        )
        .await?;

        let mut response_headers = upstream.headers;
        strip_response_headers(&mut response_headers);

        let mut persist = true;
        if context.path().contains(ANALYZE_RESULTS_SEGMENT) {
            // Polling responses are only worth keeping once the analysis is done
            if upstream.status == StatusCode::OK {
                let result: Value = serde_json::from_slice(&upstream.body)?;
                persist = result.get("status").and_then(Value::as_str) != Some("running");
            }
        } else {
            // Only the initial analyze call counts against the limiter
            context
                .values
                .insert(SIMULATOR_KEY_LIMITER.to_string(), LIMITER_NAME.to_string());
        }

        rewrite_operation_location(&mut response_headers, &context.config.local_base_url);

        debug!(
            path = context.path(),
            status = %upstream.status,
            persist = persist,
            "Document Intelligence response processed"
        );

        let mut response = Response::new(Body::from(upstream.body));
        *response.status_mut() = upstream.status;
        *response.headers_mut() = response_headers;

        Ok(Some(ForwardResult { response, persist }))
    }
}

fn upstream_url(endpoint: &str, path: &str, query: Option<&str>) -> String {
    let base = endpoint.strip_suffix('/').unwrap_or(endpoint);
    let query = query.map(|q| format!("?{}", q)).unwrap_or_default();
    format!("{}{}{}", base, path, query)
}
