//! Common test utilities for integration tests.
//!
//! Shared helpers for building a client against a wiremock server and for
//! driving Tokio's paused clock.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - Clients built here never wait on a rate limiter unless a test injects one
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)
//! - Test-specific assertions or test logic

use std::sync::Arc;
use std::time::Duration;

#[allow(unused_imports)]
pub use tfe_client::testing::generators::AuditEventGenerator;
#[allow(unused_imports)]
pub use tfe_client::testing::load_fixture;

#[allow(unused_imports)]
pub use tfe_client::{
    AuditTrailReadOptions, AuditTrails, CancellationToken, ClientError, ErrorKind, TfeClient,
    TfeClientBuilder, Unlimited,
};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Organization token used by every mocked request.
#[allow(dead_code)]
pub const ORG_TOKEN: &str = "org-test-token";

/// Audit-trail path as seen by the mock server.
#[allow(dead_code)]
pub const AUDIT_TRAIL_PATH: &str = "/api/v2/organization/audit-trail";

/// Builder pointed at `server` with an unlimited rate limiter and no retries.
#[allow(dead_code)]
pub fn client_builder(server: &MockServer) -> TfeClientBuilder {
    TfeClient::builder()
        .base_url(server.uri())
        .max_retries(0)
        .rate_limiter(Arc::new(Unlimited))
}

/// Client pointed at `server` with default test settings.
#[allow(dead_code)]
pub fn test_client(server: &MockServer) -> TfeClient {
    client_builder(server)
        .build()
        .expect("build test client")
}

/// Advance Tokio's paused clock and yield so sleepers can observe the change.
#[allow(dead_code)]
pub async fn advance_and_yield(duration: Duration) {
    tokio::time::advance(duration).await;
    tokio::task::yield_now().await;
}

/// Assert that a task has not completed after yielding to the scheduler.
#[allow(dead_code)]
pub async fn assert_pending<T>(handle: &tokio::task::JoinHandle<T>, context: &str) {
    tokio::task::yield_now().await;
    assert!(!handle.is_finished(), "Expected pending task: {}", context);
}
