//! TFE REST API client.
//!
//! This crate provides a typed client for the Terraform Enterprise / HCP
//! Terraform API. Requests are paced by a shared rate limiter, sent through a
//! retrying transport and can be cancelled cooperatively.

pub mod cancellation;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod metrics;
pub mod models;
pub mod rate_limit;
pub mod transport;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use cancellation::CancellationToken;
pub use client::builder::TfeClientBuilder;
pub use client::{AuditTrailReader, AuditTrails, TfeClient};
pub use error::{ClientError, ErrorKind, Result};
pub use metrics::{ErrorCategory, MetricsCollector};
pub use models::{
    AuditAuth, AuditEvent, AuditEventList, AuditRequest, AuditResource, AuditTrailReadOptions,
    ListOptions, Pagination,
};
pub use rate_limit::{GovernorRateLimiter, RateLimiter, Unlimited};
pub use transport::{HttpTransport, RetryPolicy, RetryingTransport};
