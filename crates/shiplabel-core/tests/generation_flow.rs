//! End-to-end generation workflow tests against the public crate API:
//! orchestrator + duplicate checker + atomic writer over the in-memory
//! label store.

use std::sync::Arc;
use std::sync::Once;

use shiplabel_core::barcode;
use shiplabel_core::orchestrator::{GenerationOrchestrator, GenerationState, SubmitOutcome};
use shiplabel_core::store::{LabelStore, MemoryLabelStore};
use shiplabel_core::test_util::{doc, request, seeded_store};

static TRACING_INIT: Once = Once::new();

fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new("shiplabel_core=debug")
                }),
            )
            .with_target(true)
            .try_init();
    });
}

#[tokio::test]
async fn fresh_document_end_to_end() {
    init_tracing();
    let store = Arc::new(MemoryLabelStore::new());
    let mut orchestrator = GenerationOrchestrator::new(store.clone());

    let outcome = orchestrator
        .submit(request(&doc("NF-1001"), 3))
        .await
        .expect("submit must succeed");
    let labels = match outcome {
        SubmitOutcome::Completed(labels) => labels,
        other => panic!("expected Completed, got {other:?}"),
    };

    assert_eq!(orchestrator.state(), GenerationState::Done);
    let sequences: Vec<u32> = labels.iter().map(|l| l.sequence).collect();
    assert_eq!(sequences, vec![1, 2, 3]);

    // The store agrees with what the orchestrator returned.
    let persisted = store
        .labels_for_document(&doc("NF-1001"))
        .await
        .expect("query must succeed");
    assert_eq!(persisted, labels);
}

#[tokio::test]
async fn duplicate_document_requires_confirmation_then_extends() {
    init_tracing();
    let store = seeded_store(&doc("NF-2002"), 2).await;
    let mut orchestrator = GenerationOrchestrator::new(store.clone());

    let outcome = orchestrator
        .submit(request(&doc("NF-2002"), 2))
        .await
        .expect("submit must succeed");
    match outcome {
        SubmitOutcome::ConfirmationRequired(result) => {
            assert_eq!(result.existing_count, 2);
            assert_eq!(result.existing_labels.len(), 2);
        }
        other => panic!("expected ConfirmationRequired, got {other:?}"),
    }

    let labels = orchestrator.confirm().await.expect("confirm must succeed");
    let sequences: Vec<u32> = labels.iter().map(|l| l.sequence).collect();
    assert_eq!(sequences, vec![3, 4]);

    let all = store
        .labels_for_document(&doc("NF-2002"))
        .await
        .expect("query must succeed");
    assert_eq!(all.len(), 4);
    assert_eq!(all.last().map(|l| l.sequence), Some(4));
}

#[tokio::test]
async fn cancelled_request_never_touches_the_store() {
    init_tracing();
    let store = seeded_store(&doc("NF-3003"), 2).await;
    let mut orchestrator = GenerationOrchestrator::new(store.clone());

    orchestrator
        .submit(request(&doc("NF-3003"), 5))
        .await
        .expect("submit must succeed");
    orchestrator.cancel().expect("cancel must succeed");

    let all = store
        .labels_for_document(&doc("NF-3003"))
        .await
        .expect("query must succeed");
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn sequences_stay_contiguous_across_many_cycles() {
    init_tracing();
    let store = Arc::new(MemoryLabelStore::new());
    let mut orchestrator = GenerationOrchestrator::new(store.clone());

    // First cycle commits directly; every later cycle goes through
    // confirmation because labels now exist.
    orchestrator
        .submit(request(&doc("NF-4004"), 2))
        .await
        .expect("first submit must succeed");
    for _ in 0..3 {
        let outcome = orchestrator
            .submit(request(&doc("NF-4004"), 2))
            .await
            .expect("submit must succeed");
        assert!(matches!(outcome, SubmitOutcome::ConfirmationRequired(_)));
        orchestrator.confirm().await.expect("confirm must succeed");
    }

    let all = store
        .labels_for_document(&doc("NF-4004"))
        .await
        .expect("query must succeed");
    let sequences: Vec<u32> = all.iter().map(|l| l.sequence).collect();
    assert_eq!(sequences, (1..=8).collect::<Vec<u32>>());
}

#[tokio::test]
async fn barcode_encoding_is_independent_of_the_workflow() {
    init_tracing();
    // The encoder is keyed only by the access key; generating labels
    // for the document must not change its output.
    let key = "35200614200166000187550010000000046550000046";
    let before = barcode::encode(key).expect("valid key must encode");

    let store = Arc::new(MemoryLabelStore::new());
    let mut orchestrator = GenerationOrchestrator::new(store);
    orchestrator
        .submit(request(&doc("NF-5005"), 1))
        .await
        .expect("submit must succeed");

    let after = barcode::encode(key).expect("valid key must encode");
    assert_eq!(before, after);
}
