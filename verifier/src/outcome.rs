//! Verification outcomes.

use serde::{Deserialize, Serialize};

/// The terminal outcome of one verification.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerdictOutcome {
    pub accepted: bool,
    /// Human-readable reason, logged alongside the commit.
    pub reason: String,
}

impl VerdictOutcome {
    pub fn accepted(reason: impl Into<String>) -> Self {
        Self {
            accepted: true,
            reason: reason.into(),
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            accepted: false,
            reason: reason.into(),
        }
    }
}
