//! Fundamental types for the Verdict KYC service.
//!
//! This crate defines the vocabulary shared across every other crate in the
//! workspace: opaque identifiers, status enums with their transition tables,
//! and timestamps.

pub mod id;
pub mod state;
pub mod time;

pub use id::{DocumentId, UserId};
pub use state::{DocumentStatus, KycStatus};
pub use time::Timestamp;
