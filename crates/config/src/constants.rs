//! Centralized constants for the TFE audit workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default address of the remote service.
pub const DEFAULT_ADDRESS: &str = "https://app.terraform.io";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Default maximum number of retries for rate-limited or failed requests.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Default outbound request budget shared by every call of one client.
pub const DEFAULT_RATE_LIMIT_PER_SECOND: u32 = 30;

// =============================================================================
// Retry Backoff Defaults
// =============================================================================

/// Lower bound of the exponential backoff between retries, in milliseconds.
pub const DEFAULT_MIN_BACKOFF_MS: u64 = 100;

/// Upper bound of the exponential backoff between retries, in milliseconds.
pub const DEFAULT_MAX_BACKOFF_MS: u64 = 400;

// =============================================================================
// Configuration Bounds
// =============================================================================

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Maximum allowed retry count.
pub const MAX_MAX_RETRIES: usize = 10;

/// Maximum allowed rate limit in requests per second.
pub const MAX_RATE_LIMIT_PER_SECOND: u32 = 1000;

// =============================================================================
// Pagination
// =============================================================================

/// Largest page size the remote service accepts.
pub const MAX_PAGE_SIZE: u32 = 100;
