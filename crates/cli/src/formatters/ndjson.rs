//! NDJSON formatter implementation.
//!
//! Invariants:
//! - Each line is one audit event as a JSON object
//! - Pagination is not emitted; lines are events only

use anyhow::Result;
use tfe_client::{AuditEvent, Pagination};

use crate::formatters::Formatter;

/// NDJSON formatter.
pub struct NdjsonFormatter;

impl Formatter for NdjsonFormatter {
    fn format_audit_events(
        &self,
        events: &[AuditEvent],
        _pagination: Option<&Pagination>,
    ) -> Result<String> {
        let mut output = String::new();
        for event in events {
            output.push_str(&serde_json::to_string(event)?);
            output.push('\n');
        }
        Ok(output)
    }
}
