use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use shiplabel_core::CoreError;

// ==============================================================================
// Error Type
// ==============================================================================

pub(crate) enum AppError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
    BadGateway(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub(super) fn map_core_error(err: CoreError) -> AppError {
    match err {
        CoreError::InvalidKeyFormat(_) | CoreError::EmptyBatch => {
            AppError::BadRequest(err.to_string())
        }
        CoreError::AuthenticationRequired => AppError::Unauthorized(err.to_string()),
        CoreError::RequestInFlight { .. }
        | CoreError::InvalidState { .. }
        | CoreError::InvalidStatusTransition { .. }
        | CoreError::PersistenceConflict { .. } => AppError::Conflict(err.to_string()),
        // The label store is an external collaborator; its failures are
        // upstream failures, not ours.
        CoreError::DuplicateCheckFailure(_) | CoreError::PersistenceError(_) => {
            AppError::BadGateway(err.to_string())
        }
    }
}
