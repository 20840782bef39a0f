//! Shared test helpers for `shiplabel-core` tests.
//!
//! Consolidates builders for documents, identities, specs, labels, and
//! pre-seeded stores so that tests across modules share one source of
//! truth for dummy data construction.

use std::sync::Arc;

use uuid::Uuid;

use crate::store::{LabelStore, MemoryLabelStore};
use crate::types::{
    GenerationRequest, Label, LabelKind, LabelSpec, LabelStatus, RequesterIdentity,
    SourceDocumentId,
};

pub fn doc(id: &str) -> SourceDocumentId {
    SourceDocumentId::from(id)
}

pub fn identity() -> RequesterIdentity {
    RequesterIdentity {
        requester_id: "operator-7".to_string(),
        organization: "acme-logistics".to_string(),
    }
}

/// A standard 100x150 mm volume label spec.
pub fn volume_spec() -> LabelSpec {
    LabelSpec {
        kind: LabelKind::Volume,
        width_mm: 100,
        height_mm: 150,
    }
}

/// A generation request for `count` volume labels with the default
/// test identity attached.
pub fn request(document: &SourceDocumentId, count: usize) -> GenerationRequest {
    GenerationRequest {
        document: document.clone(),
        specs: vec![volume_spec(); count],
        requester: Some(identity()),
    }
}

/// Build a persisted-shape label directly, bypassing the writer.
/// Useful for seeding stores and forcing sequence collisions.
pub fn make_label(document: &SourceDocumentId, sequence: u32) -> Label {
    Label {
        id: Uuid::new_v4(),
        code: format!("{document}-{sequence:03}"),
        sequence,
        kind: LabelKind::Volume,
        status: LabelStatus::Generated,
        document: document.clone(),
        created_by: "operator-7".to_string(),
        organization: "acme-logistics".to_string(),
        created_at: "2026-01-15T12:00:00Z".to_string(),
    }
}

/// A memory store pre-seeded with `count` labels (sequences 1..=count)
/// for one document.
pub async fn seeded_store(document: &SourceDocumentId, count: u32) -> Arc<MemoryLabelStore> {
    let store = Arc::new(MemoryLabelStore::new());
    if count > 0 {
        let batch = (1..=count).map(|seq| make_label(document, seq)).collect();
        store
            .insert_batch(batch)
            .await
            .expect("seeding a fresh store must succeed");
    }
    store
}
