use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use shiplabel_core::orchestrator::SubmitOutcome;
use shiplabel_core::types::{GenerationRequest, LabelSpec, SourceDocumentId};

use super::auth::{check_auth, identity_from_headers};
use super::error::{map_core_error, AppError};
use super::SharedState;

// ==============================================================================
// DTOs
// ==============================================================================

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct GenerationBody {
    document: SourceDocumentId,
    specs: Vec<LabelSpec>,
}

// ==============================================================================
// Handlers
// ==============================================================================

/// Submit a generation request. `201` with the created labels when the
/// document is clean; `409` with the duplicate-check payload when
/// pre-existing labels require confirmation.
pub(super) async fn submit_generation(
    State(state): State<SharedState>,
    headers: HeaderMap,
    req: Result<Json<GenerationBody>, JsonRejection>,
) -> Result<Response, AppError> {
    check_auth(&state.api_token, &headers)?;
    let Json(body) = req.map_err(|e| AppError::BadRequest(e.to_string()))?;

    let request = GenerationRequest {
        document: body.document,
        specs: body.specs,
        requester: identity_from_headers(&headers),
    };

    let mut orchestrator = state.orchestrator.lock().await;
    match orchestrator.submit(request).await.map_err(map_core_error)? {
        SubmitOutcome::Completed(labels) => Ok((
            StatusCode::CREATED,
            Json(serde_json::json!({ "status": "done", "labels": labels })),
        )
            .into_response()),
        SubmitOutcome::ConfirmationRequired(result) => Ok((
            StatusCode::CONFLICT,
            Json(serde_json::json!({
                "status": "confirmation_required",
                "existing_count": result.existing_count,
                "existing_labels": result.existing_labels,
            })),
        )
            .into_response()),
    }
}

/// Commit the request captured by the last `submit`.
pub(super) async fn confirm_generation(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    check_auth(&state.api_token, &headers)?;

    let mut orchestrator = state.orchestrator.lock().await;
    let labels = orchestrator.confirm().await.map_err(map_core_error)?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "status": "done", "labels": labels })),
    )
        .into_response())
}

/// Discard the pending request; the label store is left untouched.
pub(super) async fn cancel_generation(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&state.api_token, &headers)?;

    let mut orchestrator = state.orchestrator.lock().await;
    orchestrator.cancel().map_err(map_core_error)?;
    Ok(Json(serde_json::json!({ "status": "cancelled" })))
}

/// Current state of the generation machine.
pub(super) async fn generation_state(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&state.api_token, &headers)?;

    let orchestrator = state.orchestrator.lock().await;
    Ok(Json(serde_json::json!({ "state": orchestrator.state() })))
}
