//! Client builder for constructing [`TfeClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating the base URL
//! - Configuring the underlying HTTP client (timeouts, TLS verification, redirects)
//! - Wiring the default retrying transport and rate limiter, or injected ones
//!
//! # What this module does NOT handle:
//! - Actual API calls (handled by the readers in [`crate::client`])
//! - Loading settings from the environment (see the `tfe-config` crate)
//!
//! # Invariants
//! - `base_url` is required and must be an absolute `http`/`https` URL
//! - `skip_verify` only affects HTTPS connections; HTTP connections log a warning
//! - An injected transport or rate limiter replaces the default one wholesale

use std::sync::Arc;
use std::time::Duration;

use tfe_config::{
    Config,
    constants::{
        DEFAULT_MAX_BACKOFF_MS, DEFAULT_MAX_REDIRECTS, DEFAULT_MAX_RETRIES,
        DEFAULT_MIN_BACKOFF_MS, DEFAULT_RATE_LIMIT_PER_SECOND, DEFAULT_TIMEOUT_SECS,
    },
};
use url::Url;

use crate::client::TfeClient;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::rate_limit::{GovernorRateLimiter, RateLimiter};
use crate::transport::{HttpTransport, RetryPolicy, RetryingTransport};

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("tfe-client/", env!("CARGO_PKG_VERSION"));

/// Builder for creating a new [`TfeClient`].
///
/// # Example
///
/// ```rust,ignore
/// use tfe_client::TfeClient;
///
/// let client = TfeClient::builder()
///     .base_url("https://app.terraform.io".to_string())
///     .timeout(Duration::from_secs(60))
///     .retry_server_errors(true)
///     .build()?;
/// ```
pub struct TfeClientBuilder {
    base_url: Option<String>,
    skip_verify: bool,
    timeout: Duration,
    max_retries: usize,
    retry_server_errors: bool,
    min_backoff: Duration,
    max_backoff: Duration,
    rate_limit_per_second: u32,
    metrics: Option<MetricsCollector>,
    transport: Option<Arc<dyn HttpTransport>>,
    rate_limiter: Option<Arc<dyn RateLimiter>>,
}

impl Default for TfeClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_server_errors: false,
            min_backoff: Duration::from_millis(DEFAULT_MIN_BACKOFF_MS),
            max_backoff: Duration::from_millis(DEFAULT_MAX_BACKOFF_MS),
            rate_limit_per_second: DEFAULT_RATE_LIMIT_PER_SECOND,
            metrics: None,
            transport: None,
            rate_limiter: None,
        }
    }
}

impl TfeClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the service root, e.g. `https://app.terraform.io`.
    ///
    /// Any path on the URL is ignored; API paths are absolute.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// # Security Warning
    /// Only use this in development or testing environments. Disabling TLS
    /// verification makes the connection vulnerable to man-in-the-middle attacks.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Set the per-attempt request timeout.
    ///
    /// Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retries after the first attempt.
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Also retry 5xx responses and connection failures, not only HTTP 429.
    pub fn retry_server_errors(mut self, enabled: bool) -> Self {
        self.retry_server_errors = enabled;
        self
    }

    /// Bounds of the exponential backoff used when the server sends no
    /// rate-limit headers.
    pub fn backoff(mut self, min: Duration, max: Duration) -> Self {
        self.min_backoff = min;
        self.max_backoff = max;
        self
    }

    /// Requests per second allowed by the default rate limiter.
    pub fn rate_limit_per_second(mut self, per_second: u32) -> Self {
        self.rate_limit_per_second = per_second;
        self
    }

    /// Set the metrics collector for API call performance tracking.
    pub fn metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Send requests through `transport` instead of the default retrying one.
    ///
    /// Timeout, TLS and retry settings are then the transport's business.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Share `rate_limiter` instead of creating one from `rate_limit_per_second`.
    pub fn rate_limiter(mut self, rate_limiter: Arc<dyn RateLimiter>) -> Self {
        self.rate_limiter = Some(rate_limiter);
        self
    }

    /// Create a client builder from configuration.
    ///
    /// The organization token stays in `config`; it is passed per call.
    pub fn from_config(mut self, config: &Config) -> Self {
        let connection = &config.connection;
        self.base_url = Some(connection.base_url.clone());
        self.skip_verify = connection.skip_verify;
        self.timeout = connection.timeout;
        self.max_retries = connection.max_retries;
        self.retry_server_errors = connection.retry_server_errors;
        self.rate_limit_per_second = connection.rate_limit_per_second;
        self
    }

    fn parse_base_url(raw: &str) -> Result<Url> {
        let url = Url::parse(raw.trim())
            .map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "{raw}: scheme must be http or https"
            )));
        }
        if url.cannot_be_a_base() || url.host_str().is_none() {
            return Err(ClientError::InvalidUrl(format!("{raw}: missing host")));
        }
        Ok(url)
    }

    fn build_transport(&self, base_url: &Url) -> Result<Arc<dyn HttpTransport>> {
        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if self.skip_verify {
            if base_url.scheme() == "https" {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!(
                    "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        let policy = RetryPolicy {
            max_retries: self.max_retries,
            retry_server_errors: self.retry_server_errors,
            min_backoff: self.min_backoff,
            max_backoff: self.max_backoff,
        };
        let mut transport = RetryingTransport::new(http_builder.build()?, policy);
        if let Some(metrics) = &self.metrics {
            transport = transport.with_metrics(metrics.clone());
        }
        Ok(Arc::new(transport))
    }

    /// Build the [`TfeClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` is missing or invalid.
    /// Returns [`ClientError::RateLimiter`] if the rate is zero.
    /// Returns [`ClientError::HttpError`] if the HTTP client fails to build.
    pub fn build(self) -> Result<TfeClient> {
        let raw = self
            .base_url
            .as_deref()
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::parse_base_url(raw)?;

        let transport = match &self.transport {
            Some(transport) => Arc::clone(transport),
            None => self.build_transport(&base_url)?,
        };
        let rate_limiter: Arc<dyn RateLimiter> = match &self.rate_limiter {
            Some(limiter) => Arc::clone(limiter),
            None => Arc::new(GovernorRateLimiter::per_second(
                self.rate_limit_per_second,
            )?),
        };

        Ok(TfeClient {
            transport,
            rate_limiter,
            base_url,
            metrics: self.metrics,
        })
    }
}
