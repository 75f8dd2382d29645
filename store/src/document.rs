//! Document records and the document storage trait.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use verdict_types::{DocumentId, DocumentStatus, Timestamp, UserId};

/// A submitted identity document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    /// Owning user. A foreign reference, not ownership: the user record is
    /// queried independently.
    pub user_id: UserId,
    /// Client-supplied filename.
    pub original_name: String,
    /// Stored filename assigned by the upload sink.
    pub filename: String,
    /// Opaque reference to the stored payload.
    pub payload_ref: String,
    pub status: DocumentStatus,
    pub uploaded_at: Timestamp,
}

/// Result of a document status update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusUpdate {
    /// The transition was applied.
    Applied,
    /// The document was already terminal; nothing changed.
    AlreadyTerminal,
}

/// Trait for document storage operations.
pub trait DocumentStore: Send + Sync {
    /// Create a document in `Validating` state and index it under its owner,
    /// in one atomic step.
    fn create(
        &self,
        user_id: &UserId,
        original_name: &str,
        filename: &str,
        payload_ref: &str,
    ) -> Document;

    fn get(&self, id: &DocumentId) -> Result<Document, StoreError>;

    /// All documents owned by a user, in insertion order.
    fn list_by_user(&self, user_id: &UserId) -> Vec<Document>;

    /// Move a document to a terminal status.
    ///
    /// Returns [`StatusUpdate::AlreadyTerminal`], a no-op, when the
    /// document has already been committed; this is the guard that makes
    /// duplicate completion deliveries safe. Any move back to `Validating`
    /// is an [`StoreError::IllegalTransition`].
    fn update_status(
        &self,
        id: &DocumentId,
        status: DocumentStatus,
    ) -> Result<StatusUpdate, StoreError>;

    fn document_count(&self) -> usize;
}
