//! HTTP transport with retry and backoff.
//!
//! [`HttpTransport`] is the seam every endpoint sends through, so tests and
//! embedding applications can substitute their own. [`RetryingTransport`] is
//! the default implementation over `reqwest`:
//! - HTTP 429 is always retried; 500/502/503/504 and connection failures only
//!   when `retry_server_errors` is enabled
//! - the wait honours `X-RateLimit-Reset` or `Retry-After`, otherwise it is
//!   exponential between `min_backoff` and `max_backoff`
//! - non-success final responses are turned into [`ClientError`]s
//! - a cancelled token cuts a backoff wait short with [`ClientError::Cancelled`]
//!
//! # What this module does NOT handle:
//! - Pacing across calls (see [`crate::rate_limit`])
//! - Decoding success bodies (see [`crate::endpoints`])

use std::fmt;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Request, Response};
use tfe_config::constants::{
    DEFAULT_MAX_BACKOFF_MS, DEFAULT_MAX_RETRIES, DEFAULT_MIN_BACKOFF_MS,
};
use tracing::{debug, warn};

use crate::cancellation::CancellationToken;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::ApiErrors;

/// Header carrying the seconds until the rate-limit window resets.
const RATE_LIMIT_RESET_HEADER: &str = "X-RateLimit-Reset";

/// Header carrying the server-side request identifier.
const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Longest wait a server header may impose between two attempts.
const MAX_HEADER_BACKOFF: Duration = Duration::from_secs(60);

/// Sends one HTTP request and returns a successful response.
#[async_trait]
pub trait HttpTransport: Send + Sync + fmt::Debug {
    /// Send `request`, applying whatever retry behaviour the transport has.
    ///
    /// Implementations return `Ok` only for 2xx responses, and stop waiting
    /// between attempts once `cancel` fires.
    async fn execute(&self, request: Request, cancel: &CancellationToken) -> Result<Response>;
}

/// When and how long [`RetryingTransport`] waits before trying again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: usize,
    /// Also retry 5xx responses and connection failures.
    pub retry_server_errors: bool,
    pub min_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            retry_server_errors: false,
            min_backoff: Duration::from_millis(DEFAULT_MIN_BACKOFF_MS),
            max_backoff: Duration::from_millis(DEFAULT_MAX_BACKOFF_MS),
        }
    }
}

impl RetryPolicy {
    fn should_retry_status(&self, status: u16) -> bool {
        status == 429 || (self.retry_server_errors && ClientError::is_retryable_status(status))
    }

    fn should_retry_error(&self, error: &reqwest::Error) -> bool {
        self.retry_server_errors && (error.is_connect() || error.is_timeout())
    }

    /// Exponential backoff for `attempt` (0-based), clamped to the policy bounds.
    pub fn backoff(&self, attempt: usize) -> Duration {
        let factor = 1u32.checked_shl(attempt as u32).unwrap_or(u32::MAX);
        self.min_backoff
            .saturating_mul(factor)
            .clamp(self.min_backoff, self.max_backoff.max(self.min_backoff))
    }
}

/// Default transport: `reqwest` plus retry with backoff.
#[derive(Debug, Clone)]
pub struct RetryingTransport {
    http: reqwest::Client,
    policy: RetryPolicy,
    metrics: Option<MetricsCollector>,
}

impl RetryingTransport {
    pub fn new(http: reqwest::Client, policy: RetryPolicy) -> Self {
        Self {
            http,
            policy,
            metrics: None,
        }
    }

    /// Record per-attempt metrics into `metrics`.
    pub fn with_metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    async fn send_once(
        &self,
        request: Request,
        endpoint: &str,
        method: &str,
    ) -> reqwest::Result<Response> {
        if let Some(m) = &self.metrics {
            m.record_request(endpoint, method);
        }
        let started = Instant::now();
        let result = self.http.execute(request).await;
        if let Some(m) = &self.metrics {
            let status = result.as_ref().ok().map(|r| r.status().as_u16());
            m.record_request_duration(endpoint, method, started.elapsed(), status);
        }
        result
    }

    fn record_retry(&self, endpoint: &str, method: &str, attempt: usize) {
        if let Some(m) = &self.metrics {
            m.record_retry(endpoint, method, attempt);
        }
    }

    /// Sleep for `delay` unless `cancel` fires first.
    async fn wait_before_retry(&self, delay: Duration, cancel: &CancellationToken) -> Result<()> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Retry backoff cancelled");
                Err(ClientError::Cancelled)
            }
            _ = tokio::time::sleep(delay) => Ok(()),
        }
    }

    fn record_error(&self, endpoint: &str, method: &str, error: ClientError) -> ClientError {
        if let Some(m) = &self.metrics {
            m.record_client_error(endpoint, method, &error);
        }
        error
    }
}

#[async_trait]
impl HttpTransport for RetryingTransport {
    async fn execute(&self, request: Request, cancel: &CancellationToken) -> Result<Response> {
        let endpoint = request.url().path().to_string();
        let method = request.method().to_string();
        let max_retries = self.policy.max_retries;

        let mut attempt = 0;
        loop {
            let Some(attempt_request) = request.try_clone() else {
                debug!("Request cannot be cloned, single attempt only");
                return match self.send_once(request, &endpoint, &method).await {
                    Ok(response) if response.status().is_success() => Ok(response),
                    Ok(response) => {
                        let err = error_from_response(response).await;
                        Err(self.record_error(&endpoint, &method, err))
                    }
                    Err(e) => Err(self.record_error(&endpoint, &method, e.into())),
                };
            };

            let is_last = attempt == max_retries;
            match self.send_once(attempt_request, &endpoint, &method).await {
                Ok(response) if response.status().is_success() => {
                    if attempt > 0 {
                        debug!(attempt = attempt + 1, "Request succeeded after retry");
                    }
                    return Ok(response);
                }
                Ok(response) if self.policy.should_retry_status(response.status().as_u16()) => {
                    let status = response.status().as_u16();
                    if is_last {
                        debug!(
                            attempts = attempt + 1,
                            status, "Max retries exhausted for retryable response"
                        );
                        let err = error_from_response(response).await;
                        return Err(self.record_error(
                            &endpoint,
                            &method,
                            ClientError::MaxRetriesExceeded(attempt + 1, Box::new(err)),
                        ));
                    }

                    let delay =
                        header_backoff(&response).unwrap_or_else(|| self.policy.backoff(attempt));
                    debug!(
                        attempt = attempt + 1,
                        max_retries = max_retries + 1,
                        status,
                        backoff_ms = delay.as_millis() as u64,
                        "Retryable response, backing off"
                    );
                    drop(response);
                    self.record_retry(&endpoint, &method, attempt + 1);
                    self.wait_before_retry(delay, cancel).await?;
                }
                Ok(response) => {
                    let err = error_from_response(response).await;
                    return Err(self.record_error(&endpoint, &method, err));
                }
                Err(e) if self.policy.should_retry_error(&e) && !is_last => {
                    let delay = self.policy.backoff(attempt);
                    warn!(
                        attempt = attempt + 1,
                        error = %e,
                        backoff_ms = delay.as_millis() as u64,
                        "Transport error, retrying"
                    );
                    self.record_retry(&endpoint, &method, attempt + 1);
                    self.wait_before_retry(delay, cancel).await?;
                }
                Err(e) if self.policy.should_retry_error(&e) => {
                    return Err(self.record_error(
                        &endpoint,
                        &method,
                        ClientError::MaxRetriesExceeded(attempt + 1, Box::new(e.into())),
                    ));
                }
                Err(e) => return Err(self.record_error(&endpoint, &method, e.into())),
            }
            attempt += 1;
        }
    }
}

/// Wait requested by the server through rate-limit headers, if any.
fn header_backoff(response: &Response) -> Option<Duration> {
    backoff_from_headers(response.headers())
}

/// `X-RateLimit-Reset` (fractional seconds) or `Retry-After` (whole seconds),
/// capped at [`MAX_HEADER_BACKOFF`].
fn backoff_from_headers(headers: &HeaderMap) -> Option<Duration> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
    };

    let secs = header(RATE_LIMIT_RESET_HEADER)
        .and_then(|v| v.parse::<f64>().ok())
        .or_else(|| {
            header(reqwest::header::RETRY_AFTER.as_str())
                .and_then(|v| v.parse::<u64>().ok())
                .map(|s| s as f64)
        })?;

    if !secs.is_finite() || secs < 0.0 {
        return None;
    }
    // Clamp before converting: `Duration::from_secs_f64` panics past u64::MAX seconds
    if secs >= MAX_HEADER_BACKOFF.as_secs_f64() {
        return Some(MAX_HEADER_BACKOFF);
    }
    Some(Duration::from_secs_f64(secs))
}

/// Turn a non-success response into a [`ClientError`], consuming the body.
async fn error_from_response(response: Response) -> ClientError {
    let status = response.status();
    let url = response.url().to_string();
    let request_id = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    let message = serde_json::from_str::<ApiErrors>(&body)
        .ok()
        .and_then(|errors| errors.message())
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            } else {
                body
            }
        });

    match status.as_u16() {
        401 => ClientError::Unauthorized(message),
        404 => ClientError::NotFound(message),
        code => ClientError::ApiError {
            status: code,
            url,
            message,
            request_id,
        },
    }
}
