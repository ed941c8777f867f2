use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing or incorrect API key")]
    Authentication,

    #[error("Request to upstream failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("Upstream returned malformed JSON: {0}")]
    MalformedUpstreamBody(#[from] serde_json::Error),

    #[error("Failed to read request body: {0}")]
    Body(#[from] axum::Error),

    #[error("Invalid header value")]
    InvalidHeader,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Authentication => StatusCode::UNAUTHORIZED,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::MalformedUpstreamBody(_) => StatusCode::BAD_GATEWAY,
            AppError::Body(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidHeader => StatusCode::BAD_REQUEST,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            AppError::Authentication => "authentication_error",
            AppError::Upstream(_) => "upstream_error",
            AppError::MalformedUpstreamBody(_) => "malformed_upstream_body",
            AppError::Body(_) => "body_error",
            AppError::InvalidHeader => "invalid_header",
            AppError::Config(_) => "config_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = match &self {
            AppError::Upstream(e) => format!("Upstream request failed: {}", e),
            AppError::MalformedUpstreamBody(e) => format!("Upstream returned malformed JSON: {}", e),
            AppError::Body(e) => format!("Internal server error: {}", e),
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": {
                "message": error_message,
                "type": self.kind(),
            }
        }));

        (status, body).into_response()
    }
}
