//! Storage for the Verdict KYC service.
//!
//! The engine and API depend only on the [`IdentityStore`] / [`DocumentStore`]
//! traits; [`memory`] provides the single-process, mutex-serialized backend
//! this scope calls for. Every mutation, including the uniqueness checks in
//! `create`, happens under one lock acquisition, so readers never observe a
//! half-applied write.

pub mod document;
pub mod error;
pub mod identity;
pub mod memory;

pub use document::{Document, DocumentStore, StatusUpdate};
pub use error::StoreError;
pub use identity::{IdentityStore, User};
pub use memory::{MemoryDocumentStore, MemoryIdentityStore};
