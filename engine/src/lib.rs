//! The verification workflow engine.
//!
//! Owns the per-user KYC state machine: accepts document submissions,
//! dispatches the verifier asynchronously, and commits terminal outcomes
//! back into the stores exactly once per document. Pollers observe progress
//! through the read-only [`KycQueries`] façade.

pub mod error;
pub mod queries;
pub mod workflow;

pub use error::EngineError;
pub use queries::{KycQueries, KycStatusView};
pub use workflow::WorkflowEngine;
