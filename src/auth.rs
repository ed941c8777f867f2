use crate::error::AppError;
use axum::http::HeaderMap;
use tracing::debug;

/// Checks that `header_name` carries exactly `allowed_key_value`.
pub fn validate_api_key_header(
    headers: &HeaderMap,
    header_name: &str,
    allowed_key_value: &str,
) -> Result<(), AppError> {
    let provided = headers
        .get(header_name)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            debug!(header = header_name, "API key header missing");
            AppError::Authentication
        })?;

    if keys_match(provided.as_bytes(), allowed_key_value.as_bytes()) {
        Ok(())
    } else {
        debug!(header = header_name, "API key header did not match");
        Err(AppError::Authentication)
    }
}

// Runs over the whole key regardless of where the first mismatch is.
fn keys_match(provided: &[u8], expected: &[u8]) -> bool {
    if provided.len() != expected.len() {
        return false;
    }
    provided
        .iter()
        .zip(expected)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
