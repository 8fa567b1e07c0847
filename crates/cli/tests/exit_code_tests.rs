//! Integration tests for structured exit codes.
//!
//! These tests verify that tfe-audit returns the correct exit codes
//! for different error scenarios, enabling reliable shell scripting.

mod common;

use common::*;
use predicates::prelude::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn server_answering(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(AUDIT_TRAIL_PATH))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_success_returns_exit_code_0() {
    let server = server_answering(
        ResponseTemplate::new(200).set_body_json(load_fixture("audit_trail/read_empty.json")),
    )
    .await;
    tfe_cmd_with_base_url(&server.uri())
        .arg("read")
        .assert()
        .code(0);
}

#[tokio::test]
async fn test_unauthorized_returns_exit_code_2() {
    let server = server_answering(
        ResponseTemplate::new(401).set_body_json(load_fixture("audit_trail/error_unauthorized.json")),
    )
    .await;
    tfe_cmd_with_base_url(&server.uri())
        .arg("read")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("only organization tokens"))
        .stderr(predicate::str::contains("test-token").not());
}

/// Connection refused returns exit code 3.
#[test]
fn test_connection_refused_returns_exit_code_3() {
    tfe_cmd_with_base_url("http://127.0.0.1:1")
        .arg("read")
        .assert()
        .code(3);
}

#[tokio::test]
async fn test_not_found_returns_exit_code_4() {
    let server = server_answering(ResponseTemplate::new(404)).await;
    tfe_cmd_with_base_url(&server.uri())
        .arg("read")
        .assert()
        .code(4);
}

#[test]
fn test_invalid_since_returns_exit_code_5() {
    tfe_cmd_with_base_url("http://127.0.0.1:1")
        .args(["read", "--since", "yesterday"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("RFC 3339"));
}

#[test]
fn test_out_of_range_page_size_returns_exit_code_5() {
    tfe_cmd_with_base_url("http://127.0.0.1:1")
        .args(["read", "--page-size", "500"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("--page-size"));
}

#[test]
fn test_missing_token_returns_exit_code_5() {
    let mut cmd = tfe_cmd_with_base_url("http://127.0.0.1:1");
    cmd.env_remove("TFE_ORGANIZATION_TOKEN");
    cmd.arg("read")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("organization token is required"));
}

#[test]
fn test_invalid_output_format_returns_exit_code_5() {
    tfe_cmd_with_base_url("http://127.0.0.1:1")
        .args(["--output", "xml", "read"])
        .assert()
        .code(5);
}

#[tokio::test]
async fn test_rate_limited_returns_exit_code_7() {
    let server = server_answering(
        ResponseTemplate::new(429).set_body_json(load_fixture("audit_trail/error_rate_limited.json")),
    )
    .await;
    tfe_cmd_with_base_url(&server.uri())
        .arg("read")
        .assert()
        .code(7);
}

#[tokio::test]
async fn test_malformed_body_returns_exit_code_9() {
    let server = server_answering(ResponseTemplate::new(200).set_body_string("<html>")).await;
    tfe_cmd_with_base_url(&server.uri())
        .arg("read")
        .assert()
        .code(9)
        .stdout(predicate::str::is_empty());
}
