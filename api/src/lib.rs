//! HTTP API for the Verdict KYC service.
//!
//! A thin axum transport over the workflow engine: request validation,
//! multipart upload handling, upload persistence, password hashing, and the
//! error → status-code mapping. Everything stateful happens in the stores
//! and the engine; handlers here never hold state of their own.

pub mod credentials;
pub mod error;
pub mod handlers;
pub mod server;
pub mod uploads;
pub mod validate;

pub use error::ApiError;
pub use server::{ApiServer, AppState};
pub use uploads::UploadStore;
