//! Server configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the Verdict service.
///
/// Can be loaded from a TOML file via [`ServerConfig::from_toml_file`] or
/// built programmatically. Every field has a default so a partial file is
/// enough.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port for the HTTP API.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory for uploaded document payloads.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// Lower bound of the mock verifier's simulated delay, in milliseconds.
    #[serde(default = "default_verifier_min_delay_ms")]
    pub verifier_min_delay_ms: u64,

    /// Upper bound of the mock verifier's simulated delay, in milliseconds.
    #[serde(default = "default_verifier_max_delay_ms")]
    pub verifier_max_delay_ms: u64,

    /// Filename marker the mock verifier accepts (case-insensitive).
    #[serde(default = "default_verifier_marker")]
    pub verifier_marker: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_port() -> u16 {
    3000
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("./verdict_uploads")
}

fn default_verifier_min_delay_ms() -> u64 {
    2_000
}

fn default_verifier_max_delay_ms() -> u64 {
    20_000
}

fn default_verifier_marker() -> String {
    "valid".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("ServerConfig is always serializable to TOML")
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            upload_dir: default_upload_dir(),
            verifier_min_delay_ms: default_verifier_min_delay_ms(),
            verifier_max_delay_ms: default_verifier_max_delay_ms(),
            verifier_marker: default_verifier_marker(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = ServerConfig::default();
        let toml_str = config.to_toml_string();
        let parsed = ServerConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.port, config.port);
        assert_eq!(parsed.verifier_marker, config.verifier_marker);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = ServerConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.port, 3000);
        assert_eq!(config.verifier_min_delay_ms, 2_000);
        assert_eq!(config.verifier_max_delay_ms, 20_000);
        assert_eq!(config.verifier_marker, "valid");
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            port = 8080
            verifier_max_delay_ms = 500
        "#;
        let config = ServerConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.port, 8080);
        assert_eq!(config.verifier_max_delay_ms, 500);
        assert_eq!(config.verifier_marker, "valid"); // default
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = ServerConfig::from_toml_file(std::path::Path::new("/nonexistent/verdict.toml"));
        assert!(result.is_err());
    }
}
