//! Read-only projections for status polling.

use std::sync::Arc;
use verdict_store::{Document, DocumentStore, IdentityStore, StoreError};
use verdict_types::{KycStatus, Timestamp, UserId};

use crate::EngineError;

/// Point-in-time view of a user's aggregate KYC state.
#[derive(Clone, Debug)]
pub struct KycStatusView {
    pub kyc_status: KycStatus,
    pub kyc_verified_at: Option<Timestamp>,
}

/// Read-only façade over the two stores.
///
/// Safe to call arbitrarily often: pure reads with no side effects,
/// reflecting the latest committed state.
#[derive(Clone)]
pub struct KycQueries {
    identities: Arc<dyn IdentityStore>,
    documents: Arc<dyn DocumentStore>,
}

impl KycQueries {
    pub fn new(identities: Arc<dyn IdentityStore>, documents: Arc<dyn DocumentStore>) -> Self {
        Self {
            identities,
            documents,
        }
    }

    pub fn status_of(&self, user_id: &UserId) -> Result<KycStatusView, EngineError> {
        let user = self.resolve(user_id)?;
        Ok(KycStatusView {
            kyc_status: user.kyc_status,
            kyc_verified_at: user.kyc_verified_at,
        })
    }

    /// Documents owned by a user, in submission order. An unknown user is a
    /// `UserNotFound`, not an empty list.
    pub fn documents_of(&self, user_id: &UserId) -> Result<Vec<Document>, EngineError> {
        self.resolve(user_id)?;
        Ok(self.documents.list_by_user(user_id))
    }

    fn resolve(&self, user_id: &UserId) -> Result<verdict_store::User, EngineError> {
        self.identities.get(user_id).map_err(|e| match e {
            StoreError::NotFound(_) => EngineError::UserNotFound(user_id.to_string()),
            other => EngineError::Store(other),
        })
    }
}
