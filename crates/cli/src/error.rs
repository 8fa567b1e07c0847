//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `ClientError` variants and invalid input to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Signal handling (see cancellation.rs for SIGINT handling).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use tfe_client::{ClientError, ErrorKind};
use tfe_config::ConfigError;
use thiserror::Error;

/// A command-line value that failed validation before any request was sent.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct InvalidInput(pub String);

/// Structured exit codes for tfe-audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Authentication failure - the token was rejected.
    ///
    /// Scripts should check that an organization token (not a user or team
    /// token) is configured.
    AuthenticationFailed = 2,

    /// Connection error - network, timeout, or DNS failure.
    ///
    /// Scripts may retry with exponential backoff.
    ConnectionError = 3,

    /// Resource not found.
    NotFound = 4,

    /// Validation error - bad flags, URL or configuration.
    ///
    /// Scripts should fix the input and not retry the same request.
    ValidationError = 5,

    /// Permission denied - the token lacks access to the audit trail.
    PermissionDenied = 6,

    /// Rate limited - HTTP 429 after all retries.
    ///
    /// Scripts should back off and retry later.
    RateLimited = 7,

    /// Service unavailable - HTTP 502/503/504.
    ServiceUnavailable = 8,

    /// The server answered with a body that is not an audit-trail document.
    DecodeError = 9,

    /// Interrupted - SIGINT/Ctrl+C (Unix standard: 128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::Cancelled => ExitCode::Interrupted,
            ClientError::Unauthorized(_) => ExitCode::AuthenticationFailed,
            ClientError::NotFound(_) => ExitCode::NotFound,

            ClientError::ApiError { status, .. } => match status {
                401 => ExitCode::AuthenticationFailed,
                403 => ExitCode::PermissionDenied,
                404 => ExitCode::NotFound,
                400 | 422 => ExitCode::ValidationError,
                429 => ExitCode::RateLimited,
                502..=504 => ExitCode::ServiceUnavailable,
                _ => ExitCode::GeneralError,
            },

            // Max retries exceeded - check the underlying error recursively
            ClientError::MaxRetriesExceeded(_, inner) => Self::from(inner.as_ref()),

            ClientError::HttpError(e) if e.is_connect() || e.is_timeout() => {
                ExitCode::ConnectionError
            }

            other => match other.kind() {
                ErrorKind::RequestConstruction | ErrorKind::RateLimitWait => {
                    ExitCode::ValidationError
                }
                ErrorKind::Transport => ExitCode::ConnectionError,
                ErrorKind::Decode => ExitCode::DecodeError,
                ErrorKind::Api => ExitCode::GeneralError,
            },
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if nothing in the chain is recognized.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
            if cause.is::<InvalidInput>() || cause.is::<ConfigError>() {
                return ExitCode::ValidationError;
            }
        }
        ExitCode::GeneralError
    }
}
