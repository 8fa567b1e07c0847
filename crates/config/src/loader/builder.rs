//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for layered configuration.
//! - Build and validate the final `Config`.
//!
//! Invariants / Assumptions:
//! - Builder methods applied after `from_env()` take precedence over environment variables.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.
//! - The base URL falls back to the hosted service address when never set.

use secrecy::SecretString;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{
    DEFAULT_ADDRESS, DEFAULT_MAX_RETRIES, DEFAULT_RATE_LIMIT_PER_SECOND, DEFAULT_TIMEOUT_SECS,
    MAX_MAX_RETRIES, MAX_RATE_LIMIT_PER_SECOND, MAX_TIMEOUT_SECS,
};
use crate::types::{Config, ConnectionConfig};

/// Configuration loader that builds config from environment variables and overrides.
#[derive(Default)]
pub struct ConfigLoader {
    base_url: Option<String>,
    token: Option<SecretString>,
    skip_verify: Option<bool>,
    timeout: Option<Duration>,
    max_retries: Option<usize>,
    rate_limit_per_second: Option<u32>,
    retry_server_errors: Option<bool>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file is not loaded.
    /// Missing `.env` files are silently ignored.
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the organization token.
    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum number of retries.
    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Set the outbound rate limit in requests per second.
    pub fn with_rate_limit_per_second(mut self, rate: u32) -> Self {
        self.rate_limit_per_second = Some(rate);
        self
    }

    /// Skip TLS certificate verification.
    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    /// Retry 5xx responses in addition to 429.
    pub fn with_retry_server_errors(mut self, retry: bool) -> Self {
        self.retry_server_errors = Some(retry);
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let base_url = validate_and_normalize_base_url(
            self.base_url.as_deref().unwrap_or(DEFAULT_ADDRESS),
        )?;

        let connection = ConnectionConfig {
            base_url,
            skip_verify: self.skip_verify.unwrap_or(false),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            retry_server_errors: self.retry_server_errors.unwrap_or(false),
            rate_limit_per_second: self
                .rate_limit_per_second
                .unwrap_or(DEFAULT_RATE_LIMIT_PER_SECOND),
        };

        Self::validate_connection(&connection)?;

        tracing::debug!(
            base_url = %connection.base_url,
            timeout_secs = connection.timeout.as_secs(),
            max_retries = connection.max_retries,
            rate_limit_per_second = connection.rate_limit_per_second,
            has_token = self.token.is_some(),
            "Built configuration"
        );

        Ok(Config {
            connection,
            token: self.token,
        })
    }

    /// Validates numeric bounds of the connection settings.
    fn validate_connection(connection: &ConnectionConfig) -> Result<(), ConfigError> {
        let timeout_secs = connection.timeout.as_secs();
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                message: "timeout must be greater than 0 seconds".to_string(),
            });
        }
        if timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "timeout exceeds maximum allowed value of {} seconds",
                    MAX_TIMEOUT_SECS
                ),
            });
        }

        if connection.max_retries > MAX_MAX_RETRIES {
            return Err(ConfigError::InvalidMaxRetries {
                message: format!(
                    "must be between 0 and {} (got {})",
                    MAX_MAX_RETRIES, connection.max_retries
                ),
            });
        }

        let rate = connection.rate_limit_per_second;
        if rate == 0 || rate > MAX_RATE_LIMIT_PER_SECOND {
            return Err(ConfigError::InvalidRateLimit {
                message: format!(
                    "must be between 1 and {} requests per second (got {})",
                    MAX_RATE_LIMIT_PER_SECOND, rate
                ),
            });
        }

        Ok(())
    }

    pub(crate) fn set_base_url(&mut self, url: Option<String>) {
        self.base_url = url;
    }

    pub(crate) fn set_token(&mut self, token: Option<SecretString>) {
        self.token = token;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn set_max_retries(&mut self, retries: Option<usize>) {
        self.max_retries = retries;
    }

    pub(crate) fn set_rate_limit_per_second(&mut self, rate: Option<u32>) {
        self.rate_limit_per_second = rate;
    }

    pub(crate) fn set_skip_verify(&mut self, skip: Option<bool>) {
        self.skip_verify = skip;
    }

    pub(crate) fn set_retry_server_errors(&mut self, retry: Option<bool>) {
        self.retry_server_errors = retry;
    }
}

/// Validate and normalize a base URL.
///
/// - Require scheme is http or https
/// - Require host is present
/// - Normalize by stripping trailing slash
fn validate_and_normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ConfigError::MissingBaseUrl);
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        var: "base_url".into(),
        message: format!(
            "must be an absolute http(s) URL with a host (e.g. https://app.terraform.io): {e}"
        ),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: format!("scheme must be http or https, got: {scheme}"),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: "host is required (e.g. https://app.terraform.io)".into(),
        });
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
