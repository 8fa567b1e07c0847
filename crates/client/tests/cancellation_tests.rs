//! Cancellation tests.
//!
//! # Invariants
//! - A token cancelled before a permit is granted yields `Cancelled`, never a
//!   transport error, and nothing is sent
//! - Cancellation while waiting on a slow limiter aborts the wait
//! - A transport failure after the token fired is reported as `Cancelled`
//! - `read_all` stops between pages once the token fires
//!
//! # What this does NOT handle
//! - Limiter pacing itself (see the `rate_limit` unit tests)

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use common::*;
use tfe_client::{HttpTransport, RateLimiter};
use wiremock::matchers::{method, path, query_param};

/// Limiter that never hands out a permit.
#[derive(Debug, Default)]
struct Exhausted {
    calls: AtomicUsize,
}

#[async_trait]
impl RateLimiter for Exhausted {
    async fn acquire(&self) -> tfe_client::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::future::pending::<()>().await;
        Ok(())
    }
}

/// Transport that observes the token firing mid-request, then fails.
#[derive(Debug, Default)]
struct CancelledMidFlight {
    calls: AtomicUsize,
}

#[async_trait]
impl HttpTransport for CancelledMidFlight {
    async fn execute(
        &self,
        request: reqwest::Request,
        cancel: &CancellationToken,
    ) -> tfe_client::Result<reqwest::Response> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        cancel.cancel();
        Err(ClientError::ApiError {
            status: 503,
            url: request.url().to_string(),
            message: "connection reset".to_string(),
            request_id: None,
        })
    }
}

async fn mount_empty_page(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(AUDIT_TRAIL_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("audit_trail/read_empty.json")),
        )
        .expect(0)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_pre_cancelled_token_sends_nothing() {
    let mock_server = MockServer::start().await;
    mount_empty_page(&mock_server).await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let client = test_client(&mock_server);
    let err = client
        .audit_trails()
        .read(ORG_TOKEN, None, &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Cancelled));
    assert_eq!(err.kind(), ErrorKind::RateLimitWait);
}

#[tokio::test]
async fn test_cancel_while_waiting_for_permit() {
    let mock_server = MockServer::start().await;
    mount_empty_page(&mock_server).await;

    let limiter = Arc::new(Exhausted::default());
    let client = client_builder(&mock_server)
        .rate_limiter(limiter.clone())
        .build()
        .unwrap();
    let cancel = CancellationToken::new();

    let handle = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            client
                .audit_trails()
                .read(ORG_TOKEN, None, &cancel)
                .await
        }
    });

    assert_pending(&handle, "read should wait for a permit").await;
    cancel.cancel();

    let err = handle.await.expect("read task").unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(limiter.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_read_all_pre_cancelled_sends_nothing() {
    let mock_server = MockServer::start().await;
    mount_empty_page(&mock_server).await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let client = test_client(&mock_server);
    let err = client
        .audit_trails()
        .read_all(ORG_TOKEN, None, Some(20), &cancel)
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
}

#[tokio::test]
async fn test_transport_failure_after_cancel_is_cancelled() {
    let transport = Arc::new(CancelledMidFlight::default());
    let client = TfeClient::builder()
        .base_url("https://tfe.example.com".to_string())
        .transport(transport.clone())
        .rate_limiter(Arc::new(Unlimited))
        .build()
        .unwrap();

    let cancel = CancellationToken::new();
    let err = client
        .audit_trails()
        .read(ORG_TOKEN, None, &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Cancelled));
    assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_read_all_stops_after_page_when_cancelled() {
    let mock_server = MockServer::start().await;
    let generator = AuditEventGenerator::new().with_count(5);
    let cancel = CancellationToken::new();

    let first_page = generator.page(1, 2);
    let cancel_on_serve = cancel.clone();
    Mock::given(method("GET"))
        .and(path(AUDIT_TRAIL_PATH))
        .and(query_param("page[number]", "1"))
        .respond_with(move |_req: &wiremock::Request| {
            cancel_on_serve.cancel();
            ResponseTemplate::new(200).set_body_json(&first_page)
        })
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(AUDIT_TRAIL_PATH))
        .and(query_param("page[number]", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(generator.page(2, 2)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .audit_trails()
        .read_all(ORG_TOKEN, None, Some(2), &cancel)
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
}
