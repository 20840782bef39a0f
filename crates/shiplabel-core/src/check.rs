//! Read-only duplicate detection for a source document.

use std::sync::Arc;

use crate::error::CoreError;
use crate::store::LabelStore;
use crate::types::{DuplicateCheckResult, SourceDocumentId};

/// Answers "does this document already have labels?" without writing
/// anything. Idempotent and side-effect-free; returns the full
/// existing-label list so the caller can show the operator what is
/// already there.
pub struct DuplicateChecker {
    store: Arc<dyn LabelStore>,
}

impl DuplicateChecker {
    pub fn new(store: Arc<dyn LabelStore>) -> Self {
        Self { store }
    }

    pub async fn check(
        &self,
        document: &SourceDocumentId,
    ) -> Result<DuplicateCheckResult, CoreError> {
        let existing = self
            .store
            .labels_for_document(document)
            .await
            .map_err(|err| CoreError::DuplicateCheckFailure(err.to_string()))?;

        tracing::debug!(
            document = %document,
            existing = existing.len(),
            "duplicate check completed"
        );

        Ok(DuplicateCheckResult {
            has_duplicates: !existing.is_empty(),
            existing_count: existing.len(),
            existing_labels: existing,
        })
    }
}
