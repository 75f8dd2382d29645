//! User records and the identity storage trait.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use verdict_types::{KycStatus, Timestamp, UserId};

/// A registered user.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Unique across all users, stored as given (case-sensitive).
    pub email: String,
    /// Unique across all users, stored as given.
    pub phone: String,
    /// Opaque hashed representation of the registration password (argon2
    /// PHC string). Never serialized into API output.
    pub credential_secret: String,
    pub kyc_status: KycStatus,
    /// Set only when `kyc_status` transitions into `Valid`.
    pub kyc_verified_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Trait for identity storage operations.
///
/// Implementations must make each method atomic with respect to concurrent
/// callers: `create` performs both uniqueness checks and the insert under one
/// serialization point, and `update_status` writes the status and the
/// verification timestamp together so readers never see one without the
/// other.
pub trait IdentityStore: Send + Sync {
    /// Create a user with a fresh id and `KycStatus::NoDocuments`.
    ///
    /// Fails with [`StoreError::DuplicateEmail`] / [`StoreError::DuplicatePhone`]
    /// when a contact field is already taken; no two concurrent calls can
    /// both succeed for the same email or phone.
    fn create(
        &self,
        email: &str,
        phone: &str,
        credential_secret: &str,
    ) -> Result<User, StoreError>;

    fn get(&self, id: &UserId) -> Result<User, StoreError>;

    /// Atomically move a user to `status`, overwriting the verification
    /// timestamp with `verified_at` in the same write.
    ///
    /// The [`KycStatus`] transition table is validated here, under the
    /// store's lock, which makes the call usable as a concurrency
    /// gate: of two racing transitions out of the same state, exactly one
    /// succeeds.
    fn update_status(
        &self,
        id: &UserId,
        status: KycStatus,
        verified_at: Option<Timestamp>,
    ) -> Result<(), StoreError>;

    fn user_count(&self) -> usize;
}
