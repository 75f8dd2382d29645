//! Pluggable document verification.
//!
//! The workflow engine does not specify HOW a document is judged, only that
//! every submission eventually resolves to exactly one accept/reject outcome.
//! Backends implement [`Verifier`]; [`MockVerifier`] is the reference
//! backend, simulating an external verification API with a bounded random
//! delay and an outcome decided purely by the document name, which keeps
//! results reproducible in tests.

pub mod mock;
pub mod outcome;

pub use mock::{MockVerifier, MockVerifierConfig};
pub use outcome::VerdictOutcome;

use tokio::sync::oneshot;
use verdict_store::Document;

/// A pluggable verification backend.
///
/// `submit` must never block the caller: the outcome is delivered later, at
/// most once, through the returned channel. If a backend fails internally it
/// drops the sender, the receiver resolves with a channel error, and the
/// caller treats that as a rejection, so a submission can never be left
/// waiting forever.
///
/// Must be called from within a tokio runtime; backends are free to spawn
/// tasks to do their work.
pub trait Verifier: Send + Sync {
    fn submit(&self, document: &Document) -> oneshot::Receiver<VerdictOutcome>;
}
