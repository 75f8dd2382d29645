//! Null verifier: fully scripted outcomes, no real timing.

use std::time::Duration;
use tokio::sync::oneshot;
use verdict_store::Document;
use verdict_verifier::{VerdictOutcome, Verifier};

/// What a [`NullVerifier`] does with each submission.
#[derive(Clone, Debug)]
pub enum NullBehavior {
    /// Resolve immediately with a fixed outcome.
    Resolve(VerdictOutcome),
    /// Resolve with a fixed outcome after a fixed delay.
    ResolveAfter(VerdictOutcome, Duration),
    /// Drop the sender without resolving, simulating an internal verifier
    /// crash. The receiver observes a channel error.
    NeverResolve,
}

/// A verifier test double with scripted behavior.
pub struct NullVerifier {
    behavior: NullBehavior,
}

impl NullVerifier {
    pub fn new(behavior: NullBehavior) -> Self {
        Self { behavior }
    }

    /// Accepts every submission immediately.
    pub fn accepting() -> Self {
        Self::new(NullBehavior::Resolve(VerdictOutcome::accepted(
            "accepted by null verifier",
        )))
    }

    /// Rejects every submission immediately.
    pub fn rejecting() -> Self {
        Self::new(NullBehavior::Resolve(VerdictOutcome::rejected(
            "rejected by null verifier",
        )))
    }

    /// Accepts every submission after `delay`.
    pub fn accepting_after(delay: Duration) -> Self {
        Self::new(NullBehavior::ResolveAfter(
            VerdictOutcome::accepted("accepted by null verifier"),
            delay,
        ))
    }

    /// Never delivers an outcome; the engine must absorb the fault.
    pub fn failing() -> Self {
        Self::new(NullBehavior::NeverResolve)
    }
}

impl Verifier for NullVerifier {
    fn submit(&self, _document: &Document) -> oneshot::Receiver<VerdictOutcome> {
        let (tx, rx) = oneshot::channel();
        match self.behavior.clone() {
            NullBehavior::Resolve(outcome) => {
                let _ = tx.send(outcome);
            }
            NullBehavior::ResolveAfter(outcome, delay) => {
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(outcome);
                });
            }
            NullBehavior::NeverResolve => drop(tx),
        }
        rx
    }
}
