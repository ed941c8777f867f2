use crate::error::AppError;
use http::{HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, warn};
use url::Url;

pub const API_KEY_HEADER: &str = "api-key";
pub const OPERATION_LOCATION_HEADER: &str = "operation-location";

/// Inbound headers never copied to the upstream request.
pub const REQUEST_HEADERS_TO_DROP: [&str; 3] = ["content-length", "host", "authorization"];

/// Upstream headers we aren't interested in. Dropping them also keeps
/// recordings small.
pub const RESPONSE_HEADERS_TO_REMOVE: [&str; 7] = [
    "apim-request-id",
    "x-content-type-options",
    "x-ms-region",
    "x-envoy-upstream-service-time",
    "Content-Length",
    "Date",
    "Strict-Transport-Security",
];

/// Copies the inbound headers for the upstream call, replacing the caller's
/// credentials with `api_key`.
pub fn forward_headers(original: &HeaderMap, api_key: &str) -> Result<HeaderMap, AppError> {
    let mut headers = HeaderMap::with_capacity(original.len() + 1);

    for (name, value) in original {
        if REQUEST_HEADERS_TO_DROP
            .iter()
            .any(|dropped| name.as_str().eq_ignore_ascii_case(dropped))
        {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }

    let mut key = HeaderValue::from_str(api_key).map_err(|_| {
        warn!("Upstream API key is not a valid header value");
        AppError::InvalidHeader
    })?;
    key.set_sensitive(true);
    headers.insert(HeaderName::from_static(API_KEY_HEADER), key);

    Ok(headers)
}

/// Removes every header in [`RESPONSE_HEADERS_TO_REMOVE`], whatever its casing.
pub fn strip_response_headers(headers: &mut HeaderMap) {
    for header in &RESPONSE_HEADERS_TO_REMOVE {
        if headers.remove(*header).is_some() {
            debug!(header = header, "Removed upstream response header");
        }
    }
}

/// Moves a polling URL onto `local_base`, keeping its path and query.
pub fn rebase_url(location: &str, local_base: &str) -> Option<String> {
    let parsed = Url::parse(location).ok()?;
    let query = parsed.query().map(|q| format!("?{}", q)).unwrap_or_default();
    Some(format!(
        "{}{}{}",
        local_base.trim_end_matches('/'),
        parsed.path(),
        query
    ))
}

/// Points `operation-location` back at the simulator so that callers poll us
/// rather than the real service. Values that fail to parse are left as they are.
pub fn rewrite_operation_location(headers: &mut HeaderMap, local_base: &str) {
    let Some(location) = headers
        .get(OPERATION_LOCATION_HEADER)
        .and_then(|h| h.to_str().ok())
    else {
        return;
    };

    let Some(rebased) = rebase_url(location, local_base) else {
        warn!(location = location, "Could not parse operation-location; leaving it unchanged");
        return;
    };

    match HeaderValue::from_str(&rebased) {
        Ok(value) => {
            debug!(from = location, to = %rebased, "Rewrote operation-location");
            headers.insert(HeaderName::from_static(OPERATION_LOCATION_HEADER), value);
        }
        Err(_) => warn!(location = %rebased, "Rebased operation-location is not a valid header value"),
    }
}
