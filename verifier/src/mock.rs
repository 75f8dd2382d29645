//! Deterministic-by-content mock verifier.
//!
//! Simulates an external verification API: each submission resolves after a
//! uniform random delay within configurable bounds, and the outcome is a
//! pure function of the document's original filename: it passes iff the
//! name contains the marker substring, case-insensitively.

use crate::{VerdictOutcome, Verifier};
use rand::Rng;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::debug;
use verdict_store::Document;

/// Configuration for [`MockVerifier`].
#[derive(Clone, Debug)]
pub struct MockVerifierConfig {
    /// Inclusive lower delay bound, in milliseconds.
    pub min_delay_ms: u64,
    /// Inclusive upper delay bound, in milliseconds.
    pub max_delay_ms: u64,
    /// Case-insensitive substring of the original filename that makes a
    /// document pass.
    pub marker: String,
}

impl Default for MockVerifierConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 2_000,
            max_delay_ms: 20_000,
            marker: "valid".to_string(),
        }
    }
}

/// The reference verification backend.
pub struct MockVerifier {
    config: MockVerifierConfig,
}

impl MockVerifier {
    pub fn new(config: MockVerifierConfig) -> Self {
        Self { config }
    }

    /// Delay bounds collapsed to zero: the mock's decision logic without
    /// the wait.
    pub fn instant() -> Self {
        Self::new(MockVerifierConfig {
            min_delay_ms: 0,
            max_delay_ms: 0,
            ..MockVerifierConfig::default()
        })
    }

    fn decide(&self, original_name: &str) -> VerdictOutcome {
        let name = original_name.to_lowercase();
        if name.contains(&self.config.marker.to_lowercase()) {
            VerdictOutcome::accepted("documents verified successfully")
        } else {
            VerdictOutcome::rejected("documents verification failed")
        }
    }

    fn pick_delay(&self) -> Duration {
        let ms = if self.config.max_delay_ms > self.config.min_delay_ms {
            rand::thread_rng().gen_range(self.config.min_delay_ms..=self.config.max_delay_ms)
        } else {
            self.config.min_delay_ms
        };
        Duration::from_millis(ms)
    }
}

impl Verifier for MockVerifier {
    fn submit(&self, document: &Document) -> oneshot::Receiver<VerdictOutcome> {
        let (tx, rx) = oneshot::channel();
        // Decided up front: the outcome depends only on the name, never on
        // timing or task scheduling.
        let outcome = self.decide(&document.original_name);
        let delay = self.pick_delay();
        let document_id = document.id.clone();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            debug!(
                document = %document_id,
                accepted = outcome.accepted,
                delay_ms = delay.as_millis() as u64,
                "mock verification resolved"
            );
            let _ = tx.send(outcome);
        });

        rx
    }
}
