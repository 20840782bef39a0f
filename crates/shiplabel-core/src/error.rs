use crate::orchestrator::GenerationState;
use crate::types::{LabelStatus, SourceDocumentId};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid access key: {0}")]
    InvalidKeyFormat(String),

    #[error("duplicate check failed: {0}")]
    DuplicateCheckFailure(String),

    #[error("sequence {sequence} already exists for document {document}")]
    PersistenceConflict {
        document: SourceDocumentId,
        sequence: u32,
    },

    #[error("label persistence failed: {0}")]
    PersistenceError(String),

    #[error("no requester identity attached to the generation request")]
    AuthenticationRequired,

    #[error("a generation request is already in flight (state: {state})")]
    RequestInFlight { state: GenerationState },

    #[error("operation not allowed in state {state}, expected {expected}")]
    InvalidState {
        state: GenerationState,
        expected: GenerationState,
    },

    #[error("label status cannot move from {from} to {to}")]
    InvalidStatusTransition { from: LabelStatus, to: LabelStatus },

    #[error("generation request contains no label specs")]
    EmptyBatch,
}
