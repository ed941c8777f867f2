use axum::http::{HeaderMap, Method, StatusCode};
use bytes::Bytes;
use tracing::debug;

use crate::error::AppError;

mod client;
pub use client::CLIENT;

/// Fully buffered upstream reply.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Sends one request upstream and buffers the whole reply. Transport errors
/// are returned as-is; nothing is retried.
pub async fn send_upstream_request(
    client: &reqwest::Client,
    method: Method,
    url: &str,
    headers: HeaderMap,
    body: Bytes,
) -> Result<UpstreamResponse, AppError> {
    debug!(method = %method, url = %url, "Sending upstream request");

    let response = client
        .request(method, url)
        .headers(headers)
        .body(body)
        .send()
        .await?;

    let status = response.status();
    let headers = response.headers().clone();
    let body = response.bytes().await?;

    debug!(status = %status, body_size = body.len(), "Upstream response received");

    Ok(UpstreamResponse {
        status,
        headers,
        body,
    })
}
