use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use shiplabel_core::barcode;
use shiplabel_core::store::StoreError;
use shiplabel_core::types::{Label, SourceDocumentId};

use super::auth::check_auth;
use super::error::{map_core_error, AppError};
use super::SharedState;

// ==============================================================================
// DTOs
// ==============================================================================

#[derive(Serialize)]
pub(super) struct DocumentLabelsResponse {
    document: SourceDocumentId,
    count: usize,
    labels: Vec<Label>,
}

/// Wire form of a `BarPattern`: referentially transparent with respect
/// to the access key, so clients may cache it indefinitely.
#[derive(Serialize)]
pub(super) struct BarcodeResponse {
    access_key: String,
    checksum: u8,
    module_count: usize,
    /// One `1` per bar module, one `0` per space module, quiet zones
    /// included.
    modules: String,
    quiet_zone_modules: usize,
    min_height_mm: f32,
}

// ==============================================================================
// Handlers
// ==============================================================================

pub(super) async fn list_document_labels(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(document): Path<String>,
) -> Result<Json<DocumentLabelsResponse>, AppError> {
    check_auth(&state.api_token, &headers)?;

    let document = SourceDocumentId::from(document.as_str());
    let labels = state
        .store
        .labels_for_document(&document)
        .await
        .map_err(|err| match err {
            StoreError::Backend(msg) => AppError::BadGateway(msg),
            other => AppError::Internal(other.to_string()),
        })?;

    Ok(Json(DocumentLabelsResponse {
        document,
        count: labels.len(),
        labels,
    }))
}

pub(super) async fn get_barcode(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(access_key): Path<String>,
) -> Result<Json<BarcodeResponse>, AppError> {
    check_auth(&state.api_token, &headers)?;

    let pattern = barcode::encode(&access_key).map_err(map_core_error)?;
    Ok(Json(BarcodeResponse {
        access_key,
        checksum: pattern.checksum(),
        module_count: pattern.module_count(),
        modules: pattern.to_module_string(),
        quiet_zone_modules: barcode::QUIET_ZONE_MODULES,
        min_height_mm: barcode::MIN_HEIGHT_MM,
    }))
}
