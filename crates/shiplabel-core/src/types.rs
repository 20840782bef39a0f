//! Domain types for the shipment-label generation engine.
//!
//! Contains the fiscal-document access key (`AccessKey`), the persisted
//! label record (`Label`) and its enums, the unpersisted label
//! description (`LabelSpec`), and the request/result types exchanged
//! with the generation orchestrator.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

// ==============================================================================
// Access Key
// ==============================================================================

/// The number of decimal digits in a fiscal-document access key.
pub const ACCESS_KEY_LEN: usize = 44;

/// A 44-digit numeric access key from a fiscal document, the payload
/// encoded into the label barcode.
///
/// The constructor is the only way to obtain a value, so every
/// `AccessKey` in the system is known to be exactly 44 ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessKey(String);

impl AccessKey {
    /// Validate and wrap a raw key string.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if raw.len() != ACCESS_KEY_LEN {
            return Err(CoreError::InvalidKeyFormat(format!(
                "expected {ACCESS_KEY_LEN} digits, got {} characters",
                raw.len()
            )));
        }
        if let Some(bad) = raw.chars().find(|c| !c.is_ascii_digit()) {
            return Err(CoreError::InvalidKeyFormat(format!(
                "non-digit character {bad:?} in key"
            )));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccessKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// ==============================================================================
// Source Document
// ==============================================================================

/// Identifier of the fiscal document a batch of labels is generated
/// against. Referenced, never owned, by this subsystem.
///
/// `#[serde(transparent)]` keeps the JSON representation a bare string,
/// so the newtype is wire-compatible with the external document service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceDocumentId(pub String);

impl From<&str> for SourceDocumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for SourceDocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// ==============================================================================
// Labels
// ==============================================================================

/// Whether a label marks a single shipment volume or the parent
/// grouping label for a multi-volume shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelKind {
    Volume,
    Parent,
}

impl std::fmt::Display for LabelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Volume => write!(f, "volume"),
            Self::Parent => write!(f, "parent"),
        }
    }
}

/// Lifecycle status of a label. Transitions are forward-only; this
/// subsystem only ever creates labels in `Generated` — the later steps
/// belong to the external print/scan workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelStatus {
    Generated,
    Labeled,
    Printed,
    Delivered,
}

impl LabelStatus {
    /// A transition is legal only if it moves strictly forward.
    pub fn can_advance_to(self, next: LabelStatus) -> bool {
        next > self
    }
}

impl std::fmt::Display for LabelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generated => write!(f, "generated"),
            Self::Labeled => write!(f, "labeled"),
            Self::Printed => write!(f, "printed"),
            Self::Delivered => write!(f, "delivered"),
        }
    }
}

/// A persisted label record. Created only by the atomic batch commit
/// and never deleted; the one mutation offered is the guarded status
/// advance below, called by the external print/scan workflows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub id: Uuid,
    /// Human-readable unique label number, derived from the source
    /// document and the per-document sequence.
    pub code: String,
    /// Per-source-document ordinal, assigned at commit time. Unique
    /// within a document.
    pub sequence: u32,
    pub kind: LabelKind,
    pub status: LabelStatus,
    pub document: SourceDocumentId,
    pub created_by: String,
    pub organization: String,
    /// RFC 3339 UTC timestamp stamped at commit time.
    pub created_at: String,
}

impl Label {
    /// Move the label to a later lifecycle status. Backward and
    /// same-status moves are rejected and leave the label unchanged.
    pub fn advance_status(&mut self, next: LabelStatus) -> Result<(), CoreError> {
        if !self.status.can_advance_to(next) {
            return Err(CoreError::InvalidStatusTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}

/// Unpersisted description of a label to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSpec {
    pub kind: LabelKind,
    pub width_mm: u32,
    pub height_mm: u32,
}

// ==============================================================================
// Generation Requests
// ==============================================================================

/// Stable identity supplied by the external identity provider and
/// attached to every created label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequesterIdentity {
    pub requester_id: String,
    pub organization: String,
}

/// A request to generate a batch of labels against one source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub document: SourceDocumentId,
    pub specs: Vec<LabelSpec>,
    /// `None` when no identity was supplied; the orchestrator rejects
    /// such requests instead of guessing a requester.
    pub requester: Option<RequesterIdentity>,
}

/// Outcome of a read-only duplicate check for one source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateCheckResult {
    pub has_duplicates: bool,
    pub existing_count: usize,
    /// The full existing-label list, so callers can show the operator
    /// exactly what is already there.
    pub existing_labels: Vec<Label>,
}
