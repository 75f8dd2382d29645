use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    #[error("phone number already registered: {0}")]
    DuplicatePhone(String),

    #[error("illegal status transition: {from} -> {to}")]
    IllegalTransition { from: String, to: String },
}
