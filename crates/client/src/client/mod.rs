//! Main TFE API client.
//!
//! [`TfeClient`] owns the pieces every request shares: the retrying
//! transport, the rate limiter and the service root URL. Resource-specific
//! readers borrow those through cheap clones.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - [`audit_trails`]: Organization audit-trail reader
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Retry and backoff (delegated to [`crate::transport`])
//!
//! # Invariants
//! - One client shares one rate limiter across all of its readers and clones.
//! - Tokens are passed per call and never stored on the client.

pub mod audit_trails;
pub mod builder;

use std::sync::Arc;

use url::Url;

use crate::metrics::MetricsCollector;
use crate::rate_limit::RateLimiter;
use crate::transport::HttpTransport;

pub use audit_trails::{AuditTrailReader, AuditTrails};

/// TFE API client.
///
/// # Creating a Client
///
/// ```rust,ignore
/// use tfe_client::TfeClient;
///
/// let client = TfeClient::builder()
///     .base_url("https://app.terraform.io".to_string())
///     .build()?;
/// let page = client
///     .audit_trails()
///     .read(&org_token, None, &CancellationToken::new())
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct TfeClient {
    pub(crate) transport: Arc<dyn HttpTransport>,
    pub(crate) rate_limiter: Arc<dyn RateLimiter>,
    pub(crate) base_url: Url,
    pub(crate) metrics: Option<MetricsCollector>,
}

impl TfeClient {
    /// Create a new client builder.
    pub fn builder() -> builder::TfeClientBuilder {
        builder::TfeClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Reader for the organization audit trail.
    pub fn audit_trails(&self) -> AuditTrailReader {
        AuditTrailReader::new(self.clone())
    }
}
