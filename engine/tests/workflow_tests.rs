//! End-to-end workflow tests driving the engine with the real mock verifier
//! (delay bounds collapsed) and with scripted null verifiers.

use std::sync::Arc;
use std::time::Duration;
use verdict_engine::{EngineError, KycQueries, WorkflowEngine};
use verdict_nullables::NullVerifier;
use verdict_store::{
    DocumentStore, IdentityStore, MemoryDocumentStore, MemoryIdentityStore,
};
use verdict_types::{DocumentStatus, KycStatus, UserId};
use verdict_verifier::{MockVerifier, Verifier};

struct World {
    identities: Arc<MemoryIdentityStore>,
    documents: Arc<MemoryDocumentStore>,
    engine: Arc<WorkflowEngine>,
    queries: KycQueries,
}

fn world(verifier: Arc<dyn Verifier>) -> World {
    let identities = Arc::new(MemoryIdentityStore::new());
    let documents = Arc::new(MemoryDocumentStore::new());
    let engine = Arc::new(WorkflowEngine::new(
        identities.clone(),
        documents.clone(),
        verifier,
    ));
    let queries = KycQueries::new(identities.clone(), documents.clone());
    World {
        identities,
        documents,
        engine,
        queries,
    }
}

async fn settle(w: &World, user_id: &UserId) -> KycStatus {
    for _ in 0..200 {
        let status = w.queries.status_of(user_id).unwrap().kyc_status;
        if status != KycStatus::Validating {
            return status;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("verification never settled");
}

#[tokio::test]
async fn marker_named_document_ends_valid() {
    // Register, submit a file whose name carries the marker, poll to the end.
    let w = world(Arc::new(MockVerifier::instant()));
    let user = w
        .identities
        .create("a@x.com", "+1-555-0100", "secret-hash")
        .unwrap();
    assert_eq!(user.kyc_status, KycStatus::NoDocuments);

    let doc = w
        .engine
        .submit_document(&user.id, "id_valid.png", "stored.png", "/up/stored.png")
        .unwrap();
    assert_eq!(doc.status, DocumentStatus::Validating);

    assert_eq!(settle(&w, &user.id).await, KycStatus::Valid);

    let view = w.queries.status_of(&user.id).unwrap();
    assert!(view.kyc_verified_at.is_some());

    let docs = w.queries.documents_of(&user.id).unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].status, DocumentStatus::Valid);
    assert_eq!(docs[0].original_name, "id_valid.png");
}

#[tokio::test]
async fn unmarked_document_ends_invalid() {
    let w = world(Arc::new(MockVerifier::instant()));
    let user = w
        .identities
        .create("b@x.com", "+1-555-0101", "secret-hash")
        .unwrap();

    w.engine
        .submit_document(&user.id, "id_card.png", "stored.png", "/up/stored.png")
        .unwrap();

    assert_eq!(settle(&w, &user.id).await, KycStatus::Invalid);

    let view = w.queries.status_of(&user.id).unwrap();
    assert!(view.kyc_verified_at.is_none());
    assert_eq!(
        w.queries.documents_of(&user.id).unwrap()[0].status,
        DocumentStatus::Invalid
    );
}

#[tokio::test]
async fn status_correlation_holds_at_every_observed_point() {
    // P3: whenever the user reads `valid`, some owned document is `valid`
    // and the timestamp is set, and conversely for every other status.
    let w = world(Arc::new(MockVerifier::instant()));
    let user = w
        .identities
        .create("c@x.com", "+1-555-0102", "secret-hash")
        .unwrap();
    w.engine
        .submit_document(&user.id, "passport_valid.pdf", "s.pdf", "/up/s.pdf")
        .unwrap();

    for _ in 0..200 {
        let view = w.queries.status_of(&user.id).unwrap();
        let has_valid_doc = w
            .queries
            .documents_of(&user.id)
            .unwrap()
            .iter()
            .any(|d| d.status == DocumentStatus::Valid);

        if view.kyc_status == KycStatus::Valid {
            assert!(has_valid_doc);
            assert!(view.kyc_verified_at.is_some());
            return;
        }
        // Until the user write lands, the only permitted intermediate view
        // is a valid document with the user still `validating`; the
        // timestamp is never set early.
        assert!(view.kyc_verified_at.is_none());
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    panic!("verification never settled");
}

#[tokio::test]
async fn second_submission_after_completion_is_rejected() {
    let w = world(Arc::new(MockVerifier::instant()));
    let user = w
        .identities
        .create("d@x.com", "+1-555-0103", "secret-hash")
        .unwrap();
    w.engine
        .submit_document(&user.id, "id_valid.png", "s.png", "/up/s.png")
        .unwrap();
    settle(&w, &user.id).await;

    let err = w
        .engine
        .submit_document(&user.id, "late.png", "s2.png", "/up/s2.png")
        .unwrap_err();
    assert!(matches!(err, EngineError::AlreadyVerified(_)));
}

#[tokio::test]
async fn rejection_then_resubmission_can_recover() {
    // invalid → validating → valid is a legal path end to end.
    let w = world(Arc::new(MockVerifier::instant()));
    let user = w
        .identities
        .create("e@x.com", "+1-555-0104", "secret-hash")
        .unwrap();

    w.engine
        .submit_document(&user.id, "blurry_scan.png", "s.png", "/up/s.png")
        .unwrap();
    assert_eq!(settle(&w, &user.id).await, KycStatus::Invalid);

    w.engine
        .submit_document(&user.id, "rescan_valid.png", "s2.png", "/up/s2.png")
        .unwrap();
    assert_eq!(settle(&w, &user.id).await, KycStatus::Valid);

    let names: Vec<_> = w
        .queries
        .documents_of(&user.id)
        .unwrap()
        .into_iter()
        .map(|d| (d.original_name, d.status))
        .collect();
    assert_eq!(
        names,
        [
            ("blurry_scan.png".to_string(), DocumentStatus::Invalid),
            ("rescan_valid.png".to_string(), DocumentStatus::Valid),
        ]
    );
}

#[tokio::test]
async fn concurrent_submissions_for_one_user_admit_one_document() {
    // Race many submissions for the same user; the atomic `Validating` gate
    // lets exactly one through.
    let w = world(Arc::new(NullVerifier::accepting_after(Duration::from_millis(
        100,
    ))));
    let user = w
        .identities
        .create("f@x.com", "+1-555-0105", "secret-hash")
        .unwrap();

    let mut handles = Vec::new();
    for i in 0..8 {
        let engine = Arc::clone(&w.engine);
        let user_id = user.id.clone();
        handles.push(tokio::spawn(async move {
            engine
                .submit_document(
                    &user_id,
                    &format!("race_{i}.png"),
                    &format!("s{i}.png"),
                    "/up/race.png",
                )
                .is_ok()
        }));
    }

    let mut accepted = 0;
    for handle in handles {
        if handle.await.unwrap() {
            accepted += 1;
        }
    }
    assert_eq!(accepted, 1);
    assert_eq!(w.documents.document_count(), 1);
}

#[tokio::test]
async fn distinct_users_verify_independently() {
    // No cross-user ordering: a slow verification for one user does not
    // hold up another's.
    let w = world(Arc::new(MockVerifier::instant()));
    let alice = w
        .identities
        .create("alice@x.com", "+1-555-0106", "h")
        .unwrap();
    let bob = w
        .identities
        .create("bob@x.com", "+1-555-0107", "h")
        .unwrap();

    w.engine
        .submit_document(&alice.id, "alice_valid.png", "a.png", "/up/a.png")
        .unwrap();
    w.engine
        .submit_document(&bob.id, "bob_card.png", "b.png", "/up/b.png")
        .unwrap();

    assert_eq!(settle(&w, &alice.id).await, KycStatus::Valid);
    assert_eq!(settle(&w, &bob.id).await, KycStatus::Invalid);
}
