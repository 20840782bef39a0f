//! The generation workflow state machine.
//!
//! Coordinates the duplicate checker and the atomic writer:
//!
//! ```text
//! Idle → Checking → Committing → Done | Failed
//!              ↘ AwaitingConfirmation → Committing → Done | Failed
//!                                    ↘ Cancelled
//! ```
//!
//! One orchestrator instance carries at most one request at a time; a
//! second `submit` while a request is between `Checking` and a terminal
//! state is rejected deterministically. Terminal states accept a fresh
//! request — callers retry from there exactly as they would from `Idle`.
//!
//! The machine never talks to the user: progress is reported through an
//! optional event channel, and notifications bind in the calling layer.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::check::DuplicateChecker;
use crate::error::CoreError;
use crate::store::LabelStore;
use crate::types::{
    DuplicateCheckResult, GenerationRequest, Label, LabelSpec, RequesterIdentity,
    SourceDocumentId,
};
use crate::writer::AtomicLabelWriter;

/// Upper bound on the duplicate check, so a dead store cannot leave a
/// request stuck in `Checking` forever.
pub const DEFAULT_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

// ==============================================================================
// States and Events
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationState {
    Idle,
    Checking,
    AwaitingConfirmation,
    Committing,
    Done,
    Cancelled,
    Failed,
}

impl GenerationState {
    /// Terminal states end a request's lifecycle; a new `submit` is
    /// accepted from any of them.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Cancelled | Self::Failed)
    }
}

impl std::fmt::Display for GenerationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Checking => write!(f, "checking"),
            Self::AwaitingConfirmation => write!(f, "awaiting_confirmation"),
            Self::Committing => write!(f, "committing"),
            Self::Done => write!(f, "done"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Progress notifications emitted by the orchestrator. Consumed by the
/// calling layer (UI, HTTP handlers, logs); the state machine itself
/// carries no user-facing messaging.
#[derive(Debug, Clone)]
pub enum GenerationEvent {
    CheckStarted {
        document: SourceDocumentId,
    },
    CheckCompleted {
        result: DuplicateCheckResult,
    },
    ConfirmationRequired {
        result: DuplicateCheckResult,
    },
    CommitStarted {
        document: SourceDocumentId,
        count: usize,
    },
    Committed {
        labels: Vec<Label>,
    },
    Cancelled {
        document: SourceDocumentId,
    },
    Failed {
        message: String,
    },
}

/// What `submit` resolved to when it did not fail outright.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The check was clean and the batch is committed.
    Completed(Vec<Label>),
    /// Pre-existing labels were found; the request is parked until
    /// `confirm` or `cancel`.
    ConfirmationRequired(DuplicateCheckResult),
}

// ==============================================================================
// Orchestrator
// ==============================================================================

/// The request captured at submit time, replayed verbatim on `confirm`.
struct PendingRequest {
    document: SourceDocumentId,
    specs: Vec<LabelSpec>,
    requester: RequesterIdentity,
}

pub struct GenerationOrchestrator {
    checker: DuplicateChecker,
    writer: AtomicLabelWriter,
    state: GenerationState,
    pending: Option<PendingRequest>,
    check_timeout: Duration,
    events: Option<mpsc::UnboundedSender<GenerationEvent>>,
}

impl GenerationOrchestrator {
    pub fn new(store: Arc<dyn LabelStore>) -> Self {
        Self {
            checker: DuplicateChecker::new(store.clone()),
            writer: AtomicLabelWriter::new(store),
            state: GenerationState::Idle,
            pending: None,
            check_timeout: DEFAULT_CHECK_TIMEOUT,
            events: None,
        }
    }

    pub fn with_check_timeout(mut self, timeout: Duration) -> Self {
        self.check_timeout = timeout;
        self
    }

    /// Bind the event channel. Replaces any previous subscription; a
    /// closed receiver is tolerated and simply drops events.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<GenerationEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.events = Some(tx);
        rx
    }

    pub fn state(&self) -> GenerationState {
        self.state
    }

    /// Run a generation request up to its first resting point: straight
    /// through to `Done` when the document is clean, or parked in
    /// `AwaitingConfirmation` when labels already exist.
    pub async fn submit(&mut self, request: GenerationRequest) -> Result<SubmitOutcome, CoreError> {
        if !(self.state == GenerationState::Idle || self.state.is_terminal()) {
            return Err(CoreError::RequestInFlight { state: self.state });
        }
        let requester = request.requester.ok_or(CoreError::AuthenticationRequired)?;
        if request.specs.is_empty() {
            return Err(CoreError::EmptyBatch);
        }

        let pending = PendingRequest {
            document: request.document,
            specs: request.specs,
            requester,
        };

        self.state = GenerationState::Checking;
        self.emit(GenerationEvent::CheckStarted {
            document: pending.document.clone(),
        });

        let check = tokio::time::timeout(
            self.check_timeout,
            self.checker.check(&pending.document),
        )
        .await;
        let result = match check {
            Ok(Ok(result)) => result,
            Ok(Err(err)) => {
                // A failed check consumes nothing: back to Idle so the
                // caller can retry the same request.
                self.state = GenerationState::Idle;
                return Err(err);
            }
            Err(_elapsed) => {
                self.state = GenerationState::Idle;
                return Err(CoreError::DuplicateCheckFailure(format!(
                    "duplicate check timed out after {:?}",
                    self.check_timeout
                )));
            }
        };
        self.emit(GenerationEvent::CheckCompleted {
            result: result.clone(),
        });

        if result.has_duplicates {
            tracing::info!(
                document = %pending.document,
                existing = result.existing_count,
                "existing labels found, awaiting confirmation"
            );
            self.pending = Some(pending);
            self.state = GenerationState::AwaitingConfirmation;
            self.emit(GenerationEvent::ConfirmationRequired {
                result: result.clone(),
            });
            return Ok(SubmitOutcome::ConfirmationRequired(result));
        }

        let labels = self.run_commit(pending).await?;
        Ok(SubmitOutcome::Completed(labels))
    }

    /// Commit the request captured at submit time. No re-check happens
    /// here: the confirmation dialog's counts may be stale if another
    /// writer landed in between, and the store's uniqueness constraint
    /// is what turns that race into a `PersistenceConflict`.
    pub async fn confirm(&mut self) -> Result<Vec<Label>, CoreError> {
        let pending = self.take_pending()?;
        self.run_commit(pending).await
    }

    /// Discard the pending request. Only legal while awaiting
    /// confirmation; once committing starts, the batch runs to
    /// completion.
    pub fn cancel(&mut self) -> Result<(), CoreError> {
        let pending = self.take_pending()?;
        self.state = GenerationState::Cancelled;
        tracing::info!(document = %pending.document, "generation cancelled");
        self.emit(GenerationEvent::Cancelled {
            document: pending.document,
        });
        Ok(())
    }

    fn take_pending(&mut self) -> Result<PendingRequest, CoreError> {
        if self.state != GenerationState::AwaitingConfirmation {
            return Err(CoreError::InvalidState {
                state: self.state,
                expected: GenerationState::AwaitingConfirmation,
            });
        }
        // AwaitingConfirmation always carries a pending request; the
        // two fields only change together in submit/confirm/cancel.
        self.pending.take().ok_or(CoreError::InvalidState {
            state: self.state,
            expected: GenerationState::AwaitingConfirmation,
        })
    }

    async fn run_commit(&mut self, pending: PendingRequest) -> Result<Vec<Label>, CoreError> {
        self.state = GenerationState::Committing;
        self.emit(GenerationEvent::CommitStarted {
            document: pending.document.clone(),
            count: pending.specs.len(),
        });

        match self
            .writer
            .commit(&pending.document, &pending.specs, &pending.requester)
            .await
        {
            Ok(labels) => {
                self.state = GenerationState::Done;
                self.emit(GenerationEvent::Committed {
                    labels: labels.clone(),
                });
                Ok(labels)
            }
            Err(err) => {
                tracing::warn!(
                    document = %pending.document,
                    error = %err,
                    "label commit failed"
                );
                self.state = GenerationState::Failed;
                self.emit(GenerationEvent::Failed {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    fn emit(&self, event: GenerationEvent) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event);
        }
    }
}
