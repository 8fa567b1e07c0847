//! Connection configuration types.
//!
//! Responsibilities:
//! - Define connection settings (URL, TLS verification, timeouts, retries, rate limit).
//! - Define the main `Config` structure combining connection settings and the organization token.
//! - Provide serialization helpers for `Duration` and `SecretString`.
//!
//! Does NOT handle:
//! - Configuration loading from env/.env (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - All duration fields are serialized as seconds (integers).
//! - The organization token is never printed by `Debug`.

use crate::constants::{
    DEFAULT_ADDRESS, DEFAULT_MAX_RETRIES, DEFAULT_RATE_LIMIT_PER_SECOND, DEFAULT_TIMEOUT_SECS,
};
use crate::loader::ConfigError;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Module for serializing an optional SecretString as a plain string.
mod optional_secret {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(secret: &Option<SecretString>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret
            .as_ref()
            .map(|s| s.expose_secret().to_string())
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.map(|s| SecretString::new(s.into())))
    }
}

/// Connection configuration for the remote service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL of the service (e.g., https://app.terraform.io)
    pub base_url: String,
    /// Whether to skip TLS verification (for self-signed certificates)
    pub skip_verify: bool,
    /// Request timeout (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
    /// Maximum number of retries for rate-limited requests
    pub max_retries: usize,
    /// Whether 5xx responses are retried in addition to 429
    #[serde(default)]
    pub retry_server_errors: bool,
    /// Outbound requests per second shared by every call of one client
    #[serde(default = "default_rate_limit")]
    pub rate_limit_per_second: u32,
}

fn default_rate_limit() -> u32 {
    DEFAULT_RATE_LIMIT_PER_SECOND
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ADDRESS.to_string(),
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_server_errors: false,
            rate_limit_per_second: DEFAULT_RATE_LIMIT_PER_SECOND,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Connection settings
    pub connection: ConnectionConfig,
    /// Organization-scoped API token, when one was configured
    #[serde(default, with = "optional_secret")]
    pub token: Option<SecretString>,
}

impl Config {
    /// Create a config for the given base URL and organization token.
    pub fn with_token(base_url: String, token: SecretString) -> Self {
        Self {
            connection: ConnectionConfig {
                base_url,
                ..ConnectionConfig::default()
            },
            token: Some(token),
        }
    }

    /// The configured organization token.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingToken`] when no token was configured.
    pub fn require_token(&self) -> Result<&SecretString, ConfigError> {
        self.token.as_ref().ok_or(ConfigError::MissingToken)
    }
}
