use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::types::{Label, SourceDocumentId};

use super::{LabelStore, StoreError};

/// In-memory label store, keyed by source document.
///
/// Backs the server binary and the test suite. Uses `tokio::sync::RwLock`
/// for async-friendly concurrent access; the write lock taken in
/// `insert_batch` is what makes the batch atomic here — a database
/// implementation would use a transaction and a unique index instead.
pub struct MemoryLabelStore {
    labels: RwLock<HashMap<SourceDocumentId, Vec<Label>>>,
}

impl MemoryLabelStore {
    pub fn new() -> Self {
        Self {
            labels: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryLabelStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LabelStore for MemoryLabelStore {
    async fn labels_for_document(
        &self,
        document: &SourceDocumentId,
    ) -> Result<Vec<Label>, StoreError> {
        let labels = self.labels.read().await;
        Ok(labels.get(document).cloned().unwrap_or_default())
    }

    async fn insert_batch(&self, batch: Vec<Label>) -> Result<Vec<Label>, StoreError> {
        let mut labels = self.labels.write().await;

        // Validate the whole batch before touching anything, so a
        // conflict anywhere leaves the store exactly as it was.
        let mut incoming: HashSet<(&SourceDocumentId, u32)> = HashSet::new();
        for label in &batch {
            let taken = labels
                .get(&label.document)
                .is_some_and(|existing| existing.iter().any(|l| l.sequence == label.sequence));
            if taken || !incoming.insert((&label.document, label.sequence)) {
                return Err(StoreError::Conflict {
                    document: label.document.clone(),
                    sequence: label.sequence,
                });
            }
        }

        for label in &batch {
            let entry = labels.entry(label.document.clone()).or_default();
            entry.push(label.clone());
            entry.sort_by_key(|l| l.sequence);
        }

        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{doc, make_label};

    #[tokio::test]
    async fn empty_document_has_no_labels() {
        let store = MemoryLabelStore::new();
        let labels = store
            .labels_for_document(&doc("DOC-1"))
            .await
            .expect("query must succeed");
        assert!(labels.is_empty());
    }

    #[tokio::test]
    async fn inserted_labels_come_back_ordered_by_sequence() {
        let store = MemoryLabelStore::new();
        store
            .insert_batch(vec![
                make_label(&doc("DOC-1"), 2),
                make_label(&doc("DOC-1"), 1),
                make_label(&doc("DOC-1"), 3),
            ])
            .await
            .expect("insert must succeed");

        let labels = store
            .labels_for_document(&doc("DOC-1"))
            .await
            .expect("query must succeed");
        let sequences: Vec<u32> = labels.iter().map(|l| l.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn conflicting_batch_is_rejected_whole() {
        let store = MemoryLabelStore::new();
        store
            .insert_batch(vec![make_label(&doc("DOC-1"), 1)])
            .await
            .expect("seed insert must succeed");

        // Sequence 2 is free but sequence 1 collides; nothing of this
        // batch may land.
        let result = store
            .insert_batch(vec![
                make_label(&doc("DOC-1"), 2),
                make_label(&doc("DOC-1"), 1),
            ])
            .await;
        assert!(matches!(
            result,
            Err(StoreError::Conflict { sequence: 1, .. })
        ));

        let labels = store
            .labels_for_document(&doc("DOC-1"))
            .await
            .expect("query must succeed");
        assert_eq!(labels.len(), 1);
    }

    #[tokio::test]
    async fn duplicate_sequence_within_one_batch_is_rejected() {
        let store = MemoryLabelStore::new();
        let result = store
            .insert_batch(vec![
                make_label(&doc("DOC-1"), 1),
                make_label(&doc("DOC-1"), 1),
            ])
            .await;
        assert!(matches!(result, Err(StoreError::Conflict { .. })));

        let labels = store
            .labels_for_document(&doc("DOC-1"))
            .await
            .expect("query must succeed");
        assert!(labels.is_empty());
    }

    #[tokio::test]
    async fn documents_do_not_interfere() {
        let store = MemoryLabelStore::new();
        store
            .insert_batch(vec![make_label(&doc("DOC-1"), 1)])
            .await
            .expect("insert must succeed");
        // Same sequence number, different document: no conflict.
        store
            .insert_batch(vec![make_label(&doc("DOC-2"), 1)])
            .await
            .expect("insert into other document must succeed");

        assert_eq!(
            store
                .labels_for_document(&doc("DOC-1"))
                .await
                .expect("query must succeed")
                .len(),
            1
        );
        assert_eq!(
            store
                .labels_for_document(&doc("DOC-2"))
                .await
                .expect("query must succeed")
                .len(),
            1
        );
    }
}
