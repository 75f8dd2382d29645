//! Nullable infrastructure: deterministic substitutes for the pieces whose
//! real implementations depend on timing, used by engine and API tests.

pub mod verifier;

pub use verifier::{NullBehavior, NullVerifier};
