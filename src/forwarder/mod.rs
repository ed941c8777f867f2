use crate::context::RequestContext;
use crate::error::AppError;
use async_trait::async_trait;
use axum::{body::Body, http::Response};
use std::sync::Arc;
use tracing::debug;

pub mod document_intelligence;
pub mod headers;

pub use document_intelligence::DocumentIntelligenceForwarder;

/// Outcome of a request a forwarder chose to handle.
#[derive(Debug)]
pub struct ForwardResult {
    pub response: Response<Body>,
    /// Whether the host should record this exchange for replay.
    pub persist: bool,
}

#[async_trait]
pub trait Forwarder: Send + Sync {
    /// Name used in logs and exchange records
    fn name(&self) -> &str;

    /// `Ok(None)` means the request is not for this forwarder and the host
    /// should try the next one.
    async fn handle(&self, context: &mut RequestContext)
        -> Result<Option<ForwardResult>, AppError>;
}

/// Runs forwarders in order until one handles the request.
pub async fn dispatch(
    forwarders: &[Arc<dyn Forwarder>],
    context: &mut RequestContext,
) -> Result<Option<(String, ForwardResult)>, AppError> {
    for forwarder in forwarders {
        if let Some(result) = forwarder.handle(context).await? {
            return Ok(Some((forwarder.name().to_string(), result)));
        }
        debug!(forwarder = forwarder.name(), path = context.path(), "Forwarder declined request");
    }
    Ok(None)
}

/// Forwarders registered with the host, configured from the environment.
pub fn default_forwarders() -> Vec<Arc<dyn Forwarder>> {
    vec![Arc::new(DocumentIntelligenceForwarder::from_env())]
}
