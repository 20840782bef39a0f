//! Label store abstraction.
//!
//! Defines the [`LabelStore`] trait — the seam to the external label
//! store — and provides the in-memory implementation
//! ([`MemoryLabelStore`]) used by the server binary and the tests.
//!
//! The store is the one place allowed to enforce `(document, sequence)`
//! uniqueness, because the generation workflow deliberately holds no
//! lock across its check→commit gap. A racing batch must fail with
//! [`StoreError::Conflict`] rather than overwrite or skip a sequence.

mod memory;

pub use memory::MemoryLabelStore;

use async_trait::async_trait;

use crate::types::{Label, SourceDocumentId};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sequence {sequence} already exists for document {document}")]
    Conflict {
        document: SourceDocumentId,
        sequence: u32,
    },

    #[error("label store backend failure: {0}")]
    Backend(String),
}

/// Minimal store surface the generation engine needs. Implementations
/// handle connection management and transactionality internally; the
/// one hard requirement is that `insert_batch` is all-or-nothing.
#[async_trait]
pub trait LabelStore: Send + Sync {
    /// All labels for one source document, ordered by sequence.
    async fn labels_for_document(
        &self,
        document: &SourceDocumentId,
    ) -> Result<Vec<Label>, StoreError>;

    /// Atomically insert a batch of labels. Either every label in the
    /// batch is persisted or none is; any `(document, sequence)`
    /// collision — against existing rows or within the batch itself —
    /// fails the whole call with [`StoreError::Conflict`].
    async fn insert_batch(&self, batch: Vec<Label>) -> Result<Vec<Label>, StoreError>;
}
