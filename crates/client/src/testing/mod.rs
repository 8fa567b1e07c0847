//! Testing utilities for TFE client tests.
//!
//! Helpers for loading JSON fixtures and generating audit-trail pages.
//! Available when running tests or when the `test-utils` feature is enabled.
//!
//! # Example
//! ```ignore
//! use tfe_client::testing::{load_fixture, generators::AuditEventGenerator};
//!
//! let fixture = load_fixture("audit_trail/read_page.json");
//! let page = AuditEventGenerator::new().with_count(100).page(1, 2);
//! ```

pub mod generators;

use std::path::Path;

/// Load a JSON fixture file from the fixtures directory.
///
/// # Arguments
/// * `fixture_path` - Relative path within the fixtures directory (e.g., "audit_trail/read_page.json")
///
/// # Panics
/// - If the fixture file cannot be read
/// - If the file content is not valid JSON
pub fn load_fixture(fixture_path: &str) -> serde_json::Value {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let full_path = manifest_dir.join("fixtures").join(fixture_path);
    let content = std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()));
    serde_json::from_str(&content).expect("Invalid JSON in fixture")
}
