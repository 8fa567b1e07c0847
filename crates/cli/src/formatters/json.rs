//! JSON formatter implementation.
//!
//! A single page renders as `{"data": [...], "pagination": {...}}`, matching
//! the server document; a multi-page read renders as a bare array.

use anyhow::Result;
use serde::Serialize;
use tfe_client::{AuditEvent, Pagination};

use crate::formatters::Formatter;

/// JSON formatter.
pub struct JsonFormatter;

#[derive(Serialize)]
struct PageOutput<'a> {
    data: &'a [AuditEvent],
    pagination: &'a Pagination,
}

impl Formatter for JsonFormatter {
    fn format_audit_events(
        &self,
        events: &[AuditEvent],
        pagination: Option<&Pagination>,
    ) -> Result<String> {
        let mut output = match pagination {
            Some(pagination) => serde_json::to_string_pretty(&PageOutput {
                data: events,
                pagination,
            })?,
            None => serde_json::to_string_pretty(events)?,
        };
        output.push('\n');
        Ok(output)
    }
}
