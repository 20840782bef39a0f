//! All-or-nothing batch persistence of new labels.

use std::sync::Arc;

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::CoreError;
use crate::store::{LabelStore, StoreError};
use crate::types::{Label, LabelSpec, LabelStatus, RequesterIdentity, SourceDocumentId};

/// Commits a batch of label specs against one source document.
///
/// Sequence numbers are read-then-assigned: the writer queries the
/// highest existing sequence at commit time and numbers the batch
/// contiguously from one past it. Two writers racing on the same
/// document can therefore compute the same sequences — the store's
/// uniqueness constraint turns the loser into a [`CoreError::PersistenceConflict`]
/// instead of a corrupted ordering.
pub struct AtomicLabelWriter {
    store: Arc<dyn LabelStore>,
}

impl AtomicLabelWriter {
    pub fn new(store: Arc<dyn LabelStore>) -> Self {
        Self { store }
    }

    pub async fn commit(
        &self,
        document: &SourceDocumentId,
        specs: &[LabelSpec],
        requester: &RequesterIdentity,
    ) -> Result<Vec<Label>, CoreError> {
        if specs.is_empty() {
            return Err(CoreError::EmptyBatch);
        }

        let existing = self
            .store
            .labels_for_document(document)
            .await
            .map_err(|err| CoreError::PersistenceError(err.to_string()))?;
        let next = existing.iter().map(|l| l.sequence).max().unwrap_or(0) + 1;

        let created_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|err| CoreError::PersistenceError(format!("timestamp format: {err}")))?;

        let batch: Vec<Label> = specs
            .iter()
            .enumerate()
            .map(|(offset, spec)| {
                let sequence = next + offset as u32;
                Label {
                    id: Uuid::new_v4(),
                    code: format!("{document}-{sequence:03}"),
                    sequence,
                    kind: spec.kind,
                    status: LabelStatus::Generated,
                    document: document.clone(),
                    created_by: requester.requester_id.clone(),
                    organization: requester.organization.clone(),
                    created_at: created_at.clone(),
                }
            })
            .collect();

        let created = self.store.insert_batch(batch).await.map_err(|err| match err {
            StoreError::Conflict { document, sequence } => {
                CoreError::PersistenceConflict { document, sequence }
            }
            other => CoreError::PersistenceError(other.to_string()),
        })?;

        tracing::info!(
            document = %document,
            count = created.len(),
            first_sequence = next,
            requester = %requester.requester_id,
            "committed label batch"
        );
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryLabelStore;
    use crate::test_util::{doc, identity, make_label, volume_spec};
    use crate::types::LabelKind;

    #[tokio::test]
    async fn fresh_document_starts_at_sequence_one() {
        let store = Arc::new(MemoryLabelStore::new());
        let writer = AtomicLabelWriter::new(store.clone());

        let created = writer
            .commit(&doc("DOC-1"), &[volume_spec(), volume_spec(), volume_spec()], &identity())
            .await
            .expect("commit must succeed");

        let sequences: Vec<u32> = created.iter().map(|l| l.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3]);
        assert!(created.iter().all(|l| l.status == LabelStatus::Generated));
        assert!(created.iter().all(|l| l.kind == LabelKind::Volume));
        assert_eq!(created[0].code, "DOC-1-001");
        assert_eq!(created[2].code, "DOC-1-003");
    }

    #[tokio::test]
    async fn sequences_continue_past_existing_labels() {
        let store = Arc::new(MemoryLabelStore::new());
        store
            .insert_batch(vec![
                make_label(&doc("DOC-1"), 1),
                make_label(&doc("DOC-1"), 2),
            ])
            .await
            .expect("seed insert must succeed");

        let writer = AtomicLabelWriter::new(store.clone());
        let created = writer
            .commit(&doc("DOC-1"), &[volume_spec(), volume_spec()], &identity())
            .await
            .expect("commit must succeed");

        let sequences: Vec<u32> = created.iter().map(|l| l.sequence).collect();
        assert_eq!(sequences, vec![3, 4]);

        // Seed N labels, commit M more: max sequence is N + M.
        let all = store
            .labels_for_document(&doc("DOC-1"))
            .await
            .expect("query must succeed");
        assert_eq!(all.len(), 4);
        assert_eq!(all.last().map(|l| l.sequence), Some(4));
    }

    #[tokio::test]
    async fn repeated_commits_stay_contiguous() {
        let store = Arc::new(MemoryLabelStore::new());
        let writer = AtomicLabelWriter::new(store.clone());
        for _ in 0..4 {
            writer
                .commit(&doc("DOC-1"), &[volume_spec(), volume_spec()], &identity())
                .await
                .expect("commit must succeed");
        }

        let all = store
            .labels_for_document(&doc("DOC-1"))
            .await
            .expect("query must succeed");
        let sequences: Vec<u32> = all.iter().map(|l| l.sequence).collect();
        assert_eq!(sequences, (1..=8).collect::<Vec<u32>>());
    }

    #[tokio::test]
    async fn empty_batch_is_rejected() {
        let writer = AtomicLabelWriter::new(Arc::new(MemoryLabelStore::new()));
        let result = writer.commit(&doc("DOC-1"), &[], &identity()).await;
        assert!(matches!(result, Err(CoreError::EmptyBatch)));
    }

    #[tokio::test]
    async fn racing_commit_surfaces_a_conflict() {
        // Simulate the check-then-act race: a competing writer lands
        // the next sequence after this writer has read its snapshot.
        // Re-creating the exact interleaving needs a hook inside
        // commit, so drive the store directly with the sequence this
        // writer is about to claim.
        let store = Arc::new(MemoryLabelStore::new());
        store
            .insert_batch(vec![make_label(&doc("DOC-1"), 1)])
            .await
            .expect("seed insert must succeed");

        let stale_batch = vec![
            make_label(&doc("DOC-1"), 2),
            make_label(&doc("DOC-1"), 3),
        ];
        // The race winner commits sequence 2 first.
        store
            .insert_batch(vec![make_label(&doc("DOC-1"), 2)])
            .await
            .expect("winner insert must succeed");

        let result = store.insert_batch(stale_batch).await;
        assert!(matches!(
            result,
            Err(StoreError::Conflict { sequence: 2, .. })
        ));

        // The loser persisted nothing: sequences stay 1, 2.
        let all = store
            .labels_for_document(&doc("DOC-1"))
            .await
            .expect("query must succeed");
        let sequences: Vec<u32> = all.iter().map(|l| l.sequence).collect();
        assert_eq!(sequences, vec![1, 2]);
    }

    #[tokio::test]
    async fn labels_carry_requester_identity_and_timestamp() {
        let writer = AtomicLabelWriter::new(Arc::new(MemoryLabelStore::new()));
        let created = writer
            .commit(&doc("DOC-1"), &[volume_spec()], &identity())
            .await
            .expect("commit must succeed");

        let label = &created[0];
        assert_eq!(label.created_by, identity().requester_id);
        assert_eq!(label.organization, identity().organization);
        // RFC 3339 stamps parse back.
        assert!(OffsetDateTime::parse(&label.created_at, &Rfc3339).is_ok());
    }
}
