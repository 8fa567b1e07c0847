//! REST API endpoint implementations.
//!
//! Endpoints are free functions over the injected transport and limiter;
//! [`crate::client::TfeClient`] supplies those from its own state.

mod audit_trail;
pub mod query;

pub use audit_trail::{AUDIT_TRAIL_PATH, read_audit_trail};
