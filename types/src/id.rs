//! Opaque identifier newtypes with `usr_` / `doc_` prefixes.
//!
//! Identifiers are 16 random bytes, hex-encoded. They carry no structure
//! beyond the prefix; lookups with an identifier that was never issued
//! simply miss.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

fn random_suffix() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// A user identifier, prefixed with `usr_` when generated here.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// The prefix applied to generated user identifiers.
    pub const PREFIX: &'static str = "usr_";

    /// Wrap a raw identifier string, e.g. one taken from a request path.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(format!("{}{}", Self::PREFIX, random_suffix()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A document identifier, prefixed with `doc_` when generated here.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    /// The prefix applied to generated document identifiers.
    pub const PREFIX: &'static str = "doc_";

    /// Wrap a raw identifier string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(format!("{}{}", Self::PREFIX, random_suffix()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
