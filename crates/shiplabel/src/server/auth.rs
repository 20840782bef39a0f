use axum::http::HeaderMap;

use shiplabel_core::types::RequesterIdentity;

use super::error::AppError;

pub(super) fn check_auth(expected_token: &str, headers: &HeaderMap) -> Result<(), AppError> {
    let token = headers
        .get("x-api-token")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if token != expected_token {
        return Err(AppError::Unauthorized(
            "invalid or missing X-API-Token".to_string(),
        ));
    }
    Ok(())
}

/// Read the requester identity forwarded by the identity provider.
/// Returns `None` when either header is missing or blank — the
/// orchestrator rejects identity-less requests, so no guessing here.
pub(super) fn identity_from_headers(headers: &HeaderMap) -> Option<RequesterIdentity> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    Some(RequesterIdentity {
        requester_id: header("x-requester-id")?,
        organization: header("x-organization")?,
    })
}
