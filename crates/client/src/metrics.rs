//! Metrics collection for API call performance.
//!
//! This module provides metrics collection for API calls, including:
//! - Request latency histograms
//! - Request counters (total, retries, errors)
//! - Rate limiter wait time
//! - Error categorization
//!
//! # What this module does NOT handle:
//! - Metrics exposition/export (install any `metrics` recorder in the host process)
//!
//! # Invariants
//! - All metrics use consistent label names: `endpoint`, `method`, `status`, `error_category`
//! - Metric recording is infallible
//! - Zero-cost when no metrics recorder is installed

use crate::error::ClientError;
use std::time::Duration;

/// Metric name for request duration histogram.
pub const METRIC_REQUEST_DURATION: &str = "tfe_api_request_duration_seconds";

/// Metric name for total request counter.
pub const METRIC_REQUESTS_TOTAL: &str = "tfe_api_requests_total";

/// Metric name for retry counter.
pub const METRIC_RETRIES_TOTAL: &str = "tfe_api_retries_total";

/// Metric name for error counter.
pub const METRIC_ERRORS_TOTAL: &str = "tfe_api_errors_total";

/// Metric name for rate limiter wait histogram.
pub const METRIC_RATE_LIMIT_WAIT: &str = "tfe_api_rate_limit_wait_seconds";

/// Metric name for deserialization failure counter.
pub const METRIC_DESERIALIZATION_FAILURES: &str = "tfe_api_deserialization_failures_total";

/// Error categories for metrics labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transport-level errors (connection refused, DNS, etc.)
    Transport,
    /// HTTP 4xx client errors
    Http4xx,
    /// HTTP 5xx server errors
    Http5xx,
    /// Request timeout
    Timeout,
    /// Body could not be read or decoded
    Decode,
    /// Caller cancelled
    Cancelled,
    /// Unknown/unclassified errors
    Unknown,
}

impl ErrorCategory {
    /// Returns the string label for this error category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::Http4xx => "http_4xx",
            ErrorCategory::Http5xx => "http_5xx",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::Decode => "decode",
            ErrorCategory::Cancelled => "cancelled",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl From<&ClientError> for ErrorCategory {
    fn from(error: &ClientError) -> Self {
        match error {
            ClientError::ApiError { status, .. } => status_category(*status),
            ClientError::Unauthorized(_) | ClientError::NotFound(_) => ErrorCategory::Http4xx,
            ClientError::HttpError(e) if e.is_timeout() => ErrorCategory::Timeout,
            ClientError::HttpError(e) if e.is_connect() || e.is_request() || e.is_body() => {
                ErrorCategory::Transport
            }
            ClientError::HttpError(e) if e.is_decode() => ErrorCategory::Decode,
            ClientError::Decode(_) => ErrorCategory::Decode,
            ClientError::Cancelled => ErrorCategory::Cancelled,
            ClientError::MaxRetriesExceeded(_, inner) => ErrorCategory::from(inner.as_ref()),
            _ => ErrorCategory::Unknown,
        }
    }
}

fn status_category(status: u16) -> ErrorCategory {
    if (400..500).contains(&status) {
        ErrorCategory::Http4xx
    } else if (500..600).contains(&status) {
        ErrorCategory::Http5xx
    } else {
        ErrorCategory::Unknown
    }
}

/// Metrics collector for API calls.
///
/// A lightweight wrapper around the `metrics` crate macros with consistent labels.
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    enabled: bool,
}

impl MetricsCollector {
    /// Create a new, enabled metrics collector.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create a disabled metrics collector that records nothing.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Check if metrics collection is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record the duration of one request attempt.
    ///
    /// `status` is None when the request failed before a response arrived.
    pub fn record_request_duration(
        &self,
        endpoint: &str,
        method: &str,
        duration: Duration,
        status: Option<u16>,
    ) {
        if !self.enabled {
            return;
        }

        let status_label = status.map_or("error".to_string(), |s| s.to_string());

        metrics::histogram!(METRIC_REQUEST_DURATION,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "status" => status_label,
        )
        .record(duration.as_secs_f64());
    }

    /// Record a request attempt, including retries.
    pub fn record_request(&self, endpoint: &str, method: &str) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_REQUESTS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
        )
        .increment(1);
    }

    /// Record a retry attempt (1-based, not counting the initial request).
    pub fn record_retry(&self, endpoint: &str, method: &str, attempt: usize) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_RETRIES_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "attempt" => attempt.to_string(),
        )
        .increment(1);
    }

    /// Record an error, categorizing it automatically.
    pub fn record_client_error(&self, endpoint: &str, method: &str, error: &ClientError) {
        if !self.enabled {
            return;
        }

        let category = ErrorCategory::from(error);
        metrics::counter!(METRIC_ERRORS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "error_category" => category.as_str(),
        )
        .increment(1);
    }

    /// Record how long a call waited for a rate limiter permit.
    pub fn record_rate_limit_wait(&self, endpoint: &str, waited: Duration) {
        if !self.enabled {
            return;
        }
        metrics::histogram!(METRIC_RATE_LIMIT_WAIT,
            "endpoint" => endpoint.to_string(),
        )
        .record(waited.as_secs_f64());
    }

    /// Record a deserialization failure.
    pub fn record_deserialization_failure(&self, endpoint: &str, model_type: &'static str) {
        if !self.enabled {
            return;
        }
        metrics::counter!(METRIC_DESERIALIZATION_FAILURES,
            "endpoint" => endpoint.to_string(),
            "model_type" => model_type,
        )
        .increment(1);
    }
}
