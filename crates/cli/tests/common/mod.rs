//! Shared test utilities for tfe-audit integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Provide the fixture pages the mock server answers with.
//!
//! Invariants / Assumptions:
//! - `TFE_ORGANIZATION_TOKEN` is set to "test-token" unless overridden.
//! - Retries are disabled so error tests finish after one request.

use assert_cmd::Command;

#[allow(unused_imports)]
pub use tfe_client::testing::generators::AuditEventGenerator;
#[allow(unused_imports)]
pub use tfe_client::testing::load_fixture;

/// Audit-trail path as seen by the mock server.
#[allow(dead_code)]
pub const AUDIT_TRAIL_PATH: &str = "/api/v2/organization/audit-trail";

/// Returns a hermetic `tfe-audit` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - `TFE_ORGANIZATION_TOKEN` is set to a dummy value.
/// - Other `TFE_*` variables are cleared to ensure no leakage from the host.
pub fn tfe_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("tfe-audit");

    cmd.env("DOTENV_DISABLED", "1");
    cmd.env("TFE_ORGANIZATION_TOKEN", "test-token");
    cmd.env("TFE_MAX_RETRIES", "0");

    cmd.env_remove("TFE_ADDRESS")
        .env_remove("TFE_TIMEOUT")
        .env_remove("TFE_RATE_LIMIT")
        .env_remove("TFE_SKIP_VERIFY")
        .env_remove("TFE_RETRY_SERVER_ERRORS")
        .env_remove("RUST_LOG");

    cmd
}

/// Returns a hermetic `tfe-audit` command pointed at `base_url`.
#[allow(dead_code)]
pub fn tfe_cmd_with_base_url(base_url: &str) -> Command {
    let mut cmd = tfe_cmd();
    cmd.env("TFE_ADDRESS", base_url);
    cmd
}
