//! Runtime configuration.
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `CARDVAULT_PROJECT` | Deployment id; selects `private-<id>.pem` (default: `local`) |
//! | `CARDVAULT_KEYS_DIR` | Directory holding the private keys (default: `keys`) |
//! | `BINCODES_API_KEY` | Credential for the issuer lookup service |
//! | `BINCODES_URL` | Issuer lookup base URL (default: `https://api.bincodes.com`) |
//! | `BINCODES_TIMEOUT` | Lookup timeout in seconds (default: 10) |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Clone, Serialize, Deserialize)]
pub struct TokenizerConfig {
    /// Deployment identifier used to locate the private key.
    #[serde(default = "default_project_id")]
    pub project_id: String,

    #[serde(default = "default_keys_dir")]
    pub keys_dir: PathBuf,

    /// Base URL of the issuer lookup service.
    #[serde(default = "default_bincodes_url")]
    pub bincodes_url: String,

    #[serde(default)]
    pub bincodes_api_key: Option<String>,

    /// Lookup request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub lookup_timeout_secs: u64,
}

fn default_project_id() -> String {
    "local".to_string()
}

fn default_keys_dir() -> PathBuf {
    PathBuf::from("keys")
}

fn default_bincodes_url() -> String {
    "https://api.bincodes.com".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            project_id: default_project_id(),
            keys_dir: default_keys_dir(),
            bincodes_url: default_bincodes_url(),
            bincodes_api_key: None,
            lookup_timeout_secs: default_timeout(),
        }
    }
}

impl TokenizerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            project_id: std::env::var("CARDVAULT_PROJECT")
                .unwrap_or_else(|_| default_project_id()),
            keys_dir: std::env::var("CARDVAULT_KEYS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_keys_dir()),
            bincodes_url: std::env::var("BINCODES_URL").unwrap_or_else(|_| default_bincodes_url()),
            bincodes_api_key: std::env::var("BINCODES_API_KEY").ok(),
            lookup_timeout_secs: std::env::var("BINCODES_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_timeout),
        }
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = project_id.into();
        self
    }

    pub fn with_keys_dir(mut self, keys_dir: impl Into<PathBuf>) -> Self {
        self.keys_dir = keys_dir.into();
        self
    }

    pub fn with_bincodes_url(mut self, url: impl Into<String>) -> Self {
        self.bincodes_url = url.into();
        self
    }

    pub fn with_bincodes_api_key(mut self, key: impl Into<String>) -> Self {
        self.bincodes_api_key = Some(key.into());
        self
    }

    pub fn with_lookup_timeout(mut self, secs: u64) -> Self {
        self.lookup_timeout_secs = secs;
        self
    }
}

impl fmt::Debug for TokenizerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenizerConfig")
            .field("project_id", &self.project_id)
            .field("keys_dir", &self.keys_dir)
            .field("bincodes_url", &self.bincodes_url)
            .field(
                "bincodes_api_key",
                &self.bincodes_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("lookup_timeout_secs", &self.lookup_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TokenizerConfig::default();
        assert_eq!(config.project_id, "local");
        assert_eq!(config.keys_dir, PathBuf::from("keys"));
        assert_eq!(config.lookup_timeout_secs, 10);
        assert!(config.bincodes_api_key.is_none());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: TokenizerConfig =
            serde_json::from_str(r#"{"project_id":"prod","bincodes_api_key":"k"}"#).unwrap();
        assert_eq!(config.project_id, "prod");
        assert_eq!(config.bincodes_url, "https://api.bincodes.com");
        assert_eq!(config.bincodes_api_key.as_deref(), Some("k"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = TokenizerConfig::default().with_bincodes_api_key("secret-key");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("<redacted>"));
    }
}
