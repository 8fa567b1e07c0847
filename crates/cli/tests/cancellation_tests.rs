//! Integration tests for graceful Ctrl+C/SIGINT handling.
//!
//! These tests are Unix-only because they send SIGINT to child process.
//! We assert:
//! - exit code is 130
//! - stderr contains cancellation message

#![cfg(unix)]

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn tfe_audit_bin() -> &'static std::path::Path {
    assert_cmd::cargo::cargo_bin!("tfe-audit")
}

fn send_sigint(pid: u32) {
    // SAFETY: standard Unix kill syscall
    unsafe {
        libc::kill(pid as i32, libc::SIGINT);
    }
}

#[tokio::test]
async fn test_read_ctrl_c_exits_130_with_message() {
    let server = MockServer::start().await;

    // Delay long enough so we can SIGINT while the request is in flight
    let request_seen = Arc::new(Notify::new());
    let request_seen_clone = Arc::clone(&request_seen);

    Mock::given(method("GET"))
        .and(path("/api/v2/organization/audit-trail"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(move |_req: &wiremock::Request| {
            request_seen_clone.notify_one();
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(60))
                .set_body_json(serde_json::json!({ "data": [] }))
        })
        .mount(&server)
        .await;

    let child = tokio::process::Command::new(tfe_audit_bin())
        .env("DOTENV_DISABLED", "1")
        .env("TFE_ADDRESS", server.uri())
        .env("TFE_ORGANIZATION_TOKEN", "test-token")
        .args(["--output", "json", "read"])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn tfe-audit");

    let pid = child.id().expect("child pid");
    tokio::time::timeout(Duration::from_secs(5), request_seen.notified())
        .await
        .expect("expected audit trail request before SIGINT");
    send_sigint(pid);

    let output = tokio::time::timeout(Duration::from_secs(5), child.wait_with_output())
        .await
        .expect("process should exit promptly")
        .expect("wait_with_output ok");

    assert_eq!(output.status.code(), Some(130));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Operation cancelled by user"));
    assert!(output.stdout.is_empty());
}
