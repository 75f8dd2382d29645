//! Status enums for users and documents, with explicit transition tables.
//!
//! Every mutation site validates against these tables instead of trusting
//! call-site discipline: a document never leaves a terminal status, and a
//! completed KYC never changes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregate KYC status of a user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    /// Registered, nothing submitted yet.
    NoDocuments,
    /// A document is in the verification pipeline.
    Validating,
    /// Verification passed. Terminal in this scope.
    Valid,
    /// The last verification failed; re-submission is allowed.
    Invalid,
}

impl KycStatus {
    /// Whether the transition `self → next` is allowed.
    pub fn can_transition_to(&self, next: KycStatus) -> bool {
        use KycStatus::*;
        matches!(
            (self, next),
            (NoDocuments, Validating)
                | (Invalid, Validating)
                | (Validating, Valid)
                | (Validating, Invalid)
        )
    }

    /// Whether a new document submission is accepted in this state.
    pub fn accepts_submission(&self) -> bool {
        matches!(self, Self::NoDocuments | Self::Invalid)
    }

    /// Whether this status admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoDocuments => "no_documents",
            Self::Validating => "validating",
            Self::Valid => "valid",
            Self::Invalid => "invalid",
        }
    }
}

impl fmt::Display for KycStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a single submitted document.
///
/// A document is never created terminal, and once terminal it never moves
/// again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Submitted and waiting on the verifier.
    Validating,
    /// Accepted by the verifier. Terminal.
    Valid,
    /// Rejected by the verifier. Terminal.
    Invalid,
}

impl DocumentStatus {
    /// Whether the transition `self → next` is allowed.
    pub fn can_transition_to(&self, next: DocumentStatus) -> bool {
        matches!(
            (self, next),
            (Self::Validating, Self::Valid) | (Self::Validating, Self::Invalid)
        )
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Validating)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validating => "validating",
            Self::Valid => "valid",
            Self::Invalid => "invalid",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_transition_table() {
        use KycStatus::*;
        assert!(NoDocuments.can_transition_to(Validating));
        assert!(Invalid.can_transition_to(Validating));
        assert!(Validating.can_transition_to(Valid));
        assert!(Validating.can_transition_to(Invalid));

        // Valid is terminal.
        assert!(!Valid.can_transition_to(Validating));
        assert!(!Valid.can_transition_to(Invalid));
        // No re-entry while a verification is in flight.
        assert!(!Validating.can_transition_to(Validating));
        // No skipping the pipeline.
        assert!(!NoDocuments.can_transition_to(Valid));
        assert!(!NoDocuments.can_transition_to(Invalid));
    }

    #[test]
    fn document_transition_table() {
        use DocumentStatus::*;
        assert!(Validating.can_transition_to(Valid));
        assert!(Validating.can_transition_to(Invalid));
        assert!(!Valid.can_transition_to(Invalid));
        assert!(!Invalid.can_transition_to(Valid));
        assert!(!Valid.can_transition_to(Validating));
    }

    #[test]
    fn submission_gate_matches_table() {
        assert!(KycStatus::NoDocuments.accepts_submission());
        assert!(KycStatus::Invalid.accepts_submission());
        assert!(!KycStatus::Validating.accepts_submission());
        assert!(!KycStatus::Valid.accepts_submission());
    }

    #[test]
    fn statuses_serialize_snake_case() {
        assert_eq!(
            serde_json::to_string(&KycStatus::NoDocuments).unwrap(),
            "\"no_documents\""
        );
        assert_eq!(
            serde_json::to_string(&DocumentStatus::Validating).unwrap(),
            "\"validating\""
        );
        let back: KycStatus = serde_json::from_str("\"valid\"").unwrap();
        assert_eq!(back, KycStatus::Valid);
    }
}
