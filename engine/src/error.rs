use thiserror::Error;
use verdict_store::StoreError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("KYC is already completed for user {0}")]
    AlreadyVerified(String),

    #[error("a verification is already in progress for user {0}")]
    VerificationInFlight(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
