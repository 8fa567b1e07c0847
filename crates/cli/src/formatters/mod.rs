//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Provide the table, JSON and NDJSON renderings of audit events.
//! - Resolve the `--output` flag into a formatter.
//!
//! Does NOT handle:
//! - Fetching events (see `commands`).
//!
//! ## Empty-State Handling
//!
//! | Format | Empty State Behavior | Rationale |
//! |--------|---------------------|-----------|
//! | JSON | `[]` or `{"data": [], ...}` | Machine parseable |
//! | NDJSON | No lines | Streams stay valid |
//! | Table | `No audit events found.` | Interactive format needs human feedback |
//!
//! Missing values render as `null` in JSON formats and `N/A` in tables.

use std::str::FromStr;

use anyhow::Result;
use tfe_client::{AuditEvent, Pagination};

use crate::error::InvalidInput;

mod common;
mod json;
mod ndjson;
mod table;

pub use common::output_result;
pub use json::JsonFormatter;
pub use ndjson::NdjsonFormatter;
pub use table::TableFormatter;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
    Ndjson,
}

impl FromStr for OutputFormat {
    type Err = InvalidInput;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            "ndjson" | "jsonl" => Ok(OutputFormat::Ndjson),
            _ => Err(InvalidInput(format!(
                "Invalid output format: {s}. Valid options: json, table, ndjson"
            ))),
        }
    }
}

/// Renders audit events for one output format.
pub trait Formatter {
    /// Format a list of events.
    ///
    /// `pagination` is set when the events are a single page.
    fn format_audit_events(
        &self,
        events: &[AuditEvent],
        pagination: Option<&Pagination>,
    ) -> Result<String>;
}

/// Get a formatter for the specified format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Ndjson => Box::new(NdjsonFormatter),
    }
}
