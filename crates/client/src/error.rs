//! Error types for the TFE client.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The base URL or endpoint path could not be turned into a request URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Read options could not be encoded as query parameters.
    #[error("Failed to encode query parameters: {0}")]
    QueryEncoding(String),

    /// A header value was rejected (e.g. a token containing control characters).
    #[error("Invalid header value for {0}")]
    InvalidHeader(&'static str),

    /// The caller cancelled the operation.
    #[error("Operation cancelled")]
    Cancelled,

    /// The rate limiter refused to hand out a permit.
    #[error("Rate limiter error: {0}")]
    RateLimiter(String),

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Maximum retries exceeded, carrying the final failure.
    #[error("Maximum retries exceeded ({0} attempts): {1}")]
    MaxRetriesExceeded(usize, Box<ClientError>),

    /// API error response from the server.
    #[error("API error ({status}) at {url}: {message}{}", .request_id.as_ref().map(|id| format!(" [Request ID: {id}]")).unwrap_or_default())]
    ApiError {
        status: u16,
        url: String,
        message: String,
        request_id: Option<String>,
    },

    /// The token was rejected by the server.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The response body was not the expected JSON document.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Coarse classification of [`ClientError`] used by callers that only care
/// about which stage of a request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// URL, query or header construction failed before anything was sent.
    RequestConstruction,
    /// Waiting for a rate limiter permit failed, including cancellation.
    RateLimitWait,
    /// Network or connection failure.
    Transport,
    /// The server answered with a non-success status.
    Api,
    /// The response body could not be read or decoded.
    Decode,
}

impl ClientError {
    /// Classify this error by the request stage that produced it.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidUrl(_) | Self::QueryEncoding(_) | Self::InvalidHeader(_) => {
                ErrorKind::RequestConstruction
            }
            Self::Cancelled | Self::RateLimiter(_) => ErrorKind::RateLimitWait,
            Self::HttpError(e) if e.is_builder() => ErrorKind::RequestConstruction,
            Self::HttpError(e) if e.is_decode() => ErrorKind::Decode,
            Self::HttpError(_) => ErrorKind::Transport,
            Self::MaxRetriesExceeded(_, inner) => match inner.kind() {
                ErrorKind::Api => ErrorKind::Api,
                _ => ErrorKind::Transport,
            },
            Self::ApiError { .. } | Self::Unauthorized(_) | Self::NotFound(_) => ErrorKind::Api,
            Self::Decode(_) => ErrorKind::Decode,
        }
    }

    /// Check if an HTTP status code is retryable.
    ///
    /// 429 is always retryable; 500, 502, 503 and 504 only when the
    /// transport is configured to retry server errors.
    pub fn is_retryable_status(status: u16) -> bool {
        matches!(status, 429 | 500 | 502 | 503 | 504)
    }

    /// Check if this error indicates the token was rejected.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Self::Unauthorized(_) => true,
            Self::ApiError { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }

    /// Check if this error signals caller cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16) -> ClientError {
        ClientError::ApiError {
            status,
            url: "https://app.terraform.io/api/v2/organization/audit-trail".to_string(),
            message: "boom".to_string(),
            request_id: None,
        }
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            ClientError::InvalidUrl("x".into()).kind(),
            ErrorKind::RequestConstruction
        );
        assert_eq!(
            ClientError::QueryEncoding("x".into()).kind(),
            ErrorKind::RequestConstruction
        );
        assert_eq!(ClientError::Cancelled.kind(), ErrorKind::RateLimitWait);
        assert_eq!(
            ClientError::RateLimiter("x".into()).kind(),
            ErrorKind::RateLimitWait
        );
        assert_eq!(api_error(500).kind(), ErrorKind::Api);
        assert_eq!(
            ClientError::Unauthorized("bad token".into()).kind(),
            ErrorKind::Api
        );

        let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(ClientError::from(decode).kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_max_retries_kind_follows_inner_error() {
        let err = ClientError::MaxRetriesExceeded(4, Box::new(api_error(429)));
        assert_eq!(err.kind(), ErrorKind::Api);
    }

    #[test]
    fn test_is_retryable_status() {
        for status in [429, 500, 502, 503, 504] {
            assert!(ClientError::is_retryable_status(status), "{status}");
        }
        for status in [200, 201, 400, 401, 403, 404, 422, 501] {
            assert!(!ClientError::is_retryable_status(status), "{status}");
        }
    }

    #[test]
    fn test_is_auth_error() {
        assert!(ClientError::Unauthorized("x".into()).is_auth_error());
        assert!(api_error(403).is_auth_error());
        assert!(!api_error(404).is_auth_error());
        assert!(!ClientError::Cancelled.is_auth_error());
    }

    #[test]
    fn test_api_error_display_includes_request_id() {
        let err = ClientError::ApiError {
            status: 422,
            url: "https://example.com".to_string(),
            message: "invalid page size".to_string(),
            request_id: Some("req-1".to_string()),
        };
        let text = err.to_string();
        assert!(text.contains("422"));
        assert!(text.contains("[Request ID: req-1]"));
    }
}
