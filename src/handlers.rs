use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::{sync::Arc, time::Instant};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    config::AppConfig,
    context::RequestContext,
    error::AppError,
    forwarder::{dispatch, ForwardResult, Forwarder},
    telemetry::{ExchangeRecord, MetricsRegistry},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub forwarders: Arc<Vec<Arc<dyn Forwarder>>>,
    pub metrics: Arc<MetricsRegistry>,
}

impl AppState {
    pub fn new(
        config: Arc<AppConfig>,
        forwarders: Vec<Arc<dyn Forwarder>>,
        metrics: Arc<MetricsRegistry>,
    ) -> Self {
        Self {
            config,
            forwarders: Arc::new(forwarders),
            metrics,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .fallback(simulate)
        .with_state(state)
}

pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

pub async fn simulate(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    match forward(&state, request).await {
        Ok(Some((forwarder, result, context))) => {
            let status = result.response.status();
            let limiter = context.limiter().map(str::to_string);

            info!(
                request_id = %request_id,
                forwarder = %forwarder,
                method = %method,
                path = %path,
                status = status.as_u16(),
                persist = result.persist,
                limiter = ?limiter,
                "Forwarded request"
            );

            state
                .metrics
                .record_exchange(ExchangeRecord {
                    request_id,
                    forwarder,
                    method,
                    path,
                    status_code: status.as_u16(),
                    persist: result.persist,
                    limiter,
                    total_latency: start.elapsed(),
                    request_size: context.body.len(),
                    ..Default::default()
                })
                .await;

            result.response
        }
        Ok(None) => {
            warn!(request_id = %request_id, method = %method, path = %path, "No forwarder handled the request");
            (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": {
                        "message": "No forwarder handled the request",
                        "type": "not_found",
                    }
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(request_id = %request_id, path = %path, "Forwarding error: {:?}", e);
            e.into_response()
        }
    }
}

async fn forward(
    state: &AppState,
    request: Request<Body>,
) -> Result<Option<(String, ForwardResult, RequestContext)>, AppError> {
    let (parts, body) = request.into_parts();
    let body = to_bytes(body, usize::MAX).await?;

    let mut context = RequestContext::new(
        parts.method,
        parts.uri,
        parts.headers,
        body,
        state.config.clone(),
    );

    Ok(dispatch(&state.forwarders, &mut context)
        .await?
        .map(|(forwarder, result)| (forwarder, result, context)))
}
