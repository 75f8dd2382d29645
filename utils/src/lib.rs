//! Shared utilities for the Verdict KYC service.

pub mod logging;

pub use logging::init_tracing;
