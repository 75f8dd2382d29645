//! Mutex-serialized in-memory storage.
//!
//! The only backend in this scope. Each store keeps its records and its
//! secondary indices inside one `Mutex`, so a uniqueness check plus insert,
//! or a status-plus-timestamp write, is a single atomic step. Thread-safe
//! for use with tokio's multi-threaded runtime.

use crate::document::{Document, DocumentStore, StatusUpdate};
use crate::identity::{IdentityStore, User};
use crate::StoreError;
use std::collections::HashMap;
use std::sync::Mutex;
use verdict_types::{DocumentId, DocumentStatus, KycStatus, Timestamp, UserId};

#[derive(Default)]
struct IdentityInner {
    by_id: HashMap<UserId, User>,
    email_index: HashMap<String, UserId>,
    phone_index: HashMap<String, UserId>,
}

/// In-memory user store with email/phone uniqueness indices.
#[derive(Default)]
pub struct MemoryIdentityStore {
    inner: Mutex<IdentityInner>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn create(
        &self,
        email: &str,
        phone: &str,
        credential_secret: &str,
    ) -> Result<User, StoreError> {
        let mut inner = self.inner.lock().expect("identity store lock poisoned");

        if inner.email_index.contains_key(email) {
            return Err(StoreError::DuplicateEmail(email.to_string()));
        }
        if inner.phone_index.contains_key(phone) {
            return Err(StoreError::DuplicatePhone(phone.to_string()));
        }

        let user = User {
            id: UserId::generate(),
            email: email.to_string(),
            phone: phone.to_string(),
            credential_secret: credential_secret.to_string(),
            kyc_status: KycStatus::NoDocuments,
            kyc_verified_at: None,
            created_at: Timestamp::now(),
        };

        inner.email_index.insert(user.email.clone(), user.id.clone());
        inner.phone_index.insert(user.phone.clone(), user.id.clone());
        inner.by_id.insert(user.id.clone(), user.clone());

        Ok(user)
    }

    fn get(&self, id: &UserId) -> Result<User, StoreError> {
        self.inner
            .lock()
            .expect("identity store lock poisoned")
            .by_id
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn update_status(
        &self,
        id: &UserId,
        status: KycStatus,
        verified_at: Option<Timestamp>,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("identity store lock poisoned");
        let user = inner
            .by_id
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if !user.kyc_status.can_transition_to(status) {
            return Err(StoreError::IllegalTransition {
                from: user.kyc_status.to_string(),
                to: status.to_string(),
            });
        }

        user.kyc_status = status;
        user.kyc_verified_at = verified_at;
        Ok(())
    }

    fn user_count(&self) -> usize {
        self.inner
            .lock()
            .expect("identity store lock poisoned")
            .by_id
            .len()
    }
}

#[derive(Default)]
struct DocumentInner {
    by_id: HashMap<DocumentId, Document>,
    by_user: HashMap<UserId, Vec<DocumentId>>,
}

/// In-memory document store with a per-user ownership index.
#[derive(Default)]
pub struct MemoryDocumentStore {
    inner: Mutex<DocumentInner>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn create(
        &self,
        user_id: &UserId,
        original_name: &str,
        filename: &str,
        payload_ref: &str,
    ) -> Document {
        let mut inner = self.inner.lock().expect("document store lock poisoned");

        let document = Document {
            id: DocumentId::generate(),
            user_id: user_id.clone(),
            original_name: original_name.to_string(),
            filename: filename.to_string(),
            payload_ref: payload_ref.to_string(),
            status: DocumentStatus::Validating,
            uploaded_at: Timestamp::now(),
        };

        inner
            .by_user
            .entry(user_id.clone())
            .or_default()
            .push(document.id.clone());
        inner.by_id.insert(document.id.clone(), document.clone());

        document
    }

    fn get(&self, id: &DocumentId) -> Result<Document, StoreError> {
        self.inner
            .lock()
            .expect("document store lock poisoned")
            .by_id
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn list_by_user(&self, user_id: &UserId) -> Vec<Document> {
        let inner = self.inner.lock().expect("document store lock poisoned");
        inner
            .by_user
            .get(user_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| inner.by_id.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn update_status(
        &self,
        id: &DocumentId,
        status: DocumentStatus,
    ) -> Result<StatusUpdate, StoreError> {
        let mut inner = self.inner.lock().expect("document store lock poisoned");
        let document = inner
            .by_id
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if document.status.is_terminal() {
            return Ok(StatusUpdate::AlreadyTerminal);
        }
        if !document.status.can_transition_to(status) {
            return Err(StoreError::IllegalTransition {
                from: document.status.to_string(),
                to: status.to_string(),
            });
        }

        document.status = status;
        Ok(StatusUpdate::Applied)
    }

    fn document_count(&self) -> usize {
        self.inner
            .lock()
            .expect("document store lock poisoned")
            .by_id
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    // ── Identity store ───────────────────────────────────────────────────

    #[test]
    fn create_and_get_user() {
        let store = MemoryIdentityStore::new();
        let user = store.create("a@x.com", "+1-555-0100", "$argon2$x").unwrap();
        assert_eq!(user.kyc_status, KycStatus::NoDocuments);
        assert!(user.kyc_verified_at.is_none());

        let fetched = store.get(&user.id).unwrap();
        assert_eq!(fetched.email, "a@x.com");
        assert_eq!(fetched.phone, "+1-555-0100");
    }

    #[test]
    fn duplicate_email_rejected() {
        let store = MemoryIdentityStore::new();
        store.create("a@x.com", "+1-555-0100", "h").unwrap();
        let err = store.create("a@x.com", "+1-555-0199", "h").unwrap_err();
        assert_eq!(err, StoreError::DuplicateEmail("a@x.com".to_string()));
        assert_eq!(store.user_count(), 1);
    }

    #[test]
    fn duplicate_phone_rejected() {
        let store = MemoryIdentityStore::new();
        store.create("a@x.com", "+1-555-0100", "h").unwrap();
        let err = store.create("b@x.com", "+1-555-0100", "h").unwrap_err();
        assert_eq!(err, StoreError::DuplicatePhone("+1-555-0100".to_string()));
    }

    #[test]
    fn concurrent_creates_with_same_email_admit_one_winner() {
        let store = Arc::new(MemoryIdentityStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store
                        .create("same@x.com", &format!("+1-555-010{i}"), "h")
                        .is_ok()
                })
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&ok| ok)
            .count();
        assert_eq!(successes, 1);
        assert_eq!(store.user_count(), 1);
    }

    #[test]
    fn get_unknown_user_is_not_found() {
        let store = MemoryIdentityStore::new();
        let err = store.get(&UserId::new("usr_missing")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn update_status_writes_status_and_timestamp_together() {
        let store = MemoryIdentityStore::new();
        let user = store.create("a@x.com", "+1-555-0100", "h").unwrap();

        store
            .update_status(&user.id, KycStatus::Validating, None)
            .unwrap();
        let ts = Timestamp::new(1_700_000_000);
        store
            .update_status(&user.id, KycStatus::Valid, Some(ts))
            .unwrap();

        let fetched = store.get(&user.id).unwrap();
        assert_eq!(fetched.kyc_status, KycStatus::Valid);
        assert_eq!(fetched.kyc_verified_at, Some(ts));
    }

    #[test]
    fn completed_kyc_rejects_further_transitions() {
        let store = MemoryIdentityStore::new();
        let user = store.create("a@x.com", "+1-555-0100", "h").unwrap();
        store
            .update_status(&user.id, KycStatus::Validating, None)
            .unwrap();
        store
            .update_status(&user.id, KycStatus::Valid, Some(Timestamp::now()))
            .unwrap();

        let err = store
            .update_status(&user.id, KycStatus::Validating, None)
            .unwrap_err();
        assert!(matches!(err, StoreError::IllegalTransition { .. }));
    }

    #[test]
    fn racing_validating_transitions_admit_one_winner() {
        let store = MemoryIdentityStore::new();
        let user = store.create("a@x.com", "+1-555-0100", "h").unwrap();

        let first = store.update_status(&user.id, KycStatus::Validating, None);
        let second = store.update_status(&user.id, KycStatus::Validating, None);
        assert!(first.is_ok());
        assert!(matches!(
            second.unwrap_err(),
            StoreError::IllegalTransition { .. }
        ));
    }

    // ── Document store ───────────────────────────────────────────────────

    fn sample_doc(store: &MemoryDocumentStore, user: &UserId, name: &str) -> Document {
        store.create(user, name, &format!("stored-{name}"), &format!("/tmp/{name}"))
    }

    #[test]
    fn documents_start_validating() {
        let store = MemoryDocumentStore::new();
        let user = UserId::generate();
        let doc = sample_doc(&store, &user, "id.png");
        assert_eq!(doc.status, DocumentStatus::Validating);
        assert_eq!(store.get(&doc.id).unwrap().original_name, "id.png");
    }

    #[test]
    fn list_by_user_preserves_insertion_order() {
        let store = MemoryDocumentStore::new();
        let user = UserId::generate();
        let other = UserId::generate();
        sample_doc(&store, &user, "first.png");
        sample_doc(&store, &other, "noise.png");
        sample_doc(&store, &user, "second.png");
        sample_doc(&store, &user, "third.png");

        let names: Vec<_> = store
            .list_by_user(&user)
            .into_iter()
            .map(|d| d.original_name)
            .collect();
        assert_eq!(names, ["first.png", "second.png", "third.png"]);
    }

    #[test]
    fn list_for_unknown_user_is_empty() {
        let store = MemoryDocumentStore::new();
        assert!(store.list_by_user(&UserId::generate()).is_empty());
    }

    #[test]
    fn terminal_update_is_applied_once() {
        let store = MemoryDocumentStore::new();
        let user = UserId::generate();
        let doc = sample_doc(&store, &user, "id.png");

        assert_eq!(
            store.update_status(&doc.id, DocumentStatus::Valid).unwrap(),
            StatusUpdate::Applied
        );
        // Duplicate delivery in either direction is a no-op.
        assert_eq!(
            store.update_status(&doc.id, DocumentStatus::Valid).unwrap(),
            StatusUpdate::AlreadyTerminal
        );
        assert_eq!(
            store
                .update_status(&doc.id, DocumentStatus::Invalid)
                .unwrap(),
            StatusUpdate::AlreadyTerminal
        );
        assert_eq!(store.get(&doc.id).unwrap().status, DocumentStatus::Valid);
    }

    #[test]
    fn reentering_validating_is_illegal() {
        let store = MemoryDocumentStore::new();
        let user = UserId::generate();
        let doc = sample_doc(&store, &user, "id.png");
        let err = store
            .update_status(&doc.id, DocumentStatus::Validating)
            .unwrap_err();
        assert!(matches!(err, StoreError::IllegalTransition { .. }));
    }

    #[test]
    fn update_unknown_document_is_not_found() {
        let store = MemoryDocumentStore::new();
        let err = store
            .update_status(&DocumentId::new("doc_missing"), DocumentStatus::Valid)
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
