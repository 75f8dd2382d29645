//! The submission / completion state machine.
//!
//! Per-user states: `NoDocuments → Validating → {Valid, Invalid}`, with
//! `Invalid → Validating` allowed (re-submission after rejection) and
//! `Valid` terminal. At most one verification is in flight per user, which
//! is what makes the completion handler's user write unconditionally safe.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use verdict_store::{Document, DocumentStore, IdentityStore, StatusUpdate, StoreError};
use verdict_types::{DocumentId, DocumentStatus, KycStatus, Timestamp, UserId};
use verdict_verifier::{VerdictOutcome, Verifier};

use crate::EngineError;

/// Orchestrates the verification workflow.
pub struct WorkflowEngine {
    identities: Arc<dyn IdentityStore>,
    verifier: Arc<dyn Verifier>,
    committer: Arc<OutcomeCommitter>,
}

impl WorkflowEngine {
    pub fn new(
        identities: Arc<dyn IdentityStore>,
        documents: Arc<dyn DocumentStore>,
        verifier: Arc<dyn Verifier>,
    ) -> Self {
        let committer = Arc::new(OutcomeCommitter {
            identities: identities.clone(),
            documents,
            commit_lock: Mutex::new(()),
        });
        Self {
            identities,
            verifier,
            committer,
        }
    }

    /// Accept a document for verification.
    ///
    /// Checks the user's state, moves the user to `Validating` (the atomic
    /// gate against concurrent submissions), records the document, and
    /// dispatches the verifier in the background. Returns immediately: the
    /// returned document is always `Validating`, and callers observe the
    /// terminal outcome by polling.
    pub fn submit_document(
        &self,
        user_id: &UserId,
        original_name: &str,
        filename: &str,
        payload_ref: &str,
    ) -> Result<Document, EngineError> {
        let user = self.identities.get(user_id).map_err(|e| match e {
            StoreError::NotFound(_) => EngineError::UserNotFound(user_id.to_string()),
            other => EngineError::Store(other),
        })?;

        if !user.kyc_status.accepts_submission() {
            return Err(self.submission_conflict(user_id, user.kyc_status));
        }

        // The transition table is validated under the store's lock, so of
        // two racing submissions exactly one lands here successfully; the
        // loser maps the rejected transition back to a precise conflict.
        // Flipping the user before creating the document means no document
        // record can ever be orphaned in `Validating`.
        if let Err(e) = self
            .identities
            .update_status(user_id, KycStatus::Validating, None)
        {
            return Err(match e {
                StoreError::IllegalTransition { .. } => {
                    let status = self
                        .identities
                        .get(user_id)
                        .map(|u| u.kyc_status)
                        .unwrap_or(KycStatus::Validating);
                    self.submission_conflict(user_id, status)
                }
                other => EngineError::Store(other),
            });
        }

        let document =
            self.committer
                .documents
                .create(user_id, original_name, filename, payload_ref);

        info!(
            user = %user_id,
            document = %document.id,
            name = original_name,
            "document accepted for verification"
        );

        self.dispatch(&document);

        Ok(document)
    }

    fn submission_conflict(&self, user_id: &UserId, status: KycStatus) -> EngineError {
        match status {
            KycStatus::Valid => EngineError::AlreadyVerified(user_id.to_string()),
            _ => EngineError::VerificationInFlight(user_id.to_string()),
        }
    }

    /// Hand the document to the verifier and spawn the completion task.
    fn dispatch(&self, document: &Document) {
        let rx = self.verifier.submit(document);
        let committer = Arc::clone(&self.committer);
        let document_id = document.id.clone();
        let user_id = document.user_id.clone();

        tokio::spawn(async move {
            // A dropped sender means the verifier died before answering;
            // commit a rejection so nothing stays `Validating` forever.
            let outcome = rx.await.unwrap_or_else(|_| {
                warn!(document = %document_id, "verifier failed to deliver an outcome");
                VerdictOutcome::rejected("verifier failed to deliver an outcome")
            });
            committer.commit(&document_id, &user_id, outcome).await;
        });
    }

    /// Commit a verifier outcome directly. Exposed for tests exercising the
    /// idempotent no-op guard; the normal path goes through the spawned
    /// completion task.
    pub async fn commit_outcome(
        &self,
        document_id: &DocumentId,
        user_id: &UserId,
        outcome: VerdictOutcome,
    ) {
        self.committer.commit(document_id, user_id, outcome).await;
    }
}

/// Commits verifier outcomes into both stores, exactly once per document.
struct OutcomeCommitter {
    identities: Arc<dyn IdentityStore>,
    documents: Arc<dyn DocumentStore>,
    /// Serializes completion commits: the document write and the user write
    /// of one outcome form a single logical commit.
    commit_lock: Mutex<()>,
}

impl OutcomeCommitter {
    /// Idempotent per document: a duplicate delivery finds the document
    /// already terminal and leaves both stores untouched. Writes are ordered
    /// document-first, user-last, so pollers keep seeing a conservative
    /// "still validating" aggregate until the user write lands.
    async fn commit(&self, document_id: &DocumentId, user_id: &UserId, outcome: VerdictOutcome) {
        let _commit = self.commit_lock.lock().await;

        let document_status = if outcome.accepted {
            DocumentStatus::Valid
        } else {
            DocumentStatus::Invalid
        };

        match self.documents.update_status(document_id, document_status) {
            Ok(StatusUpdate::Applied) => {}
            Ok(StatusUpdate::AlreadyTerminal) => {
                warn!(document = %document_id, "duplicate completion delivery ignored");
                return;
            }
            Err(e) => {
                warn!(document = %document_id, error = %e, "completion could not update document");
                return;
            }
        }

        let (user_status, verified_at) = if outcome.accepted {
            (KycStatus::Valid, Some(Timestamp::now()))
        } else {
            (KycStatus::Invalid, None)
        };

        if let Err(e) = self
            .identities
            .update_status(user_id, user_status, verified_at)
        {
            warn!(user = %user_id, error = %e, "completion could not update user");
            return;
        }

        info!(
            user = %user_id,
            document = %document_id,
            accepted = outcome.accepted,
            reason = %outcome.reason,
            "verification committed"
        );
    }
}
