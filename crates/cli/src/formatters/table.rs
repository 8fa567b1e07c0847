//! Table formatter implementation.
//!
//! Responsibilities:
//! - Format audit events as a tab-separated table.
//! - Append a page footer when the events are a single page.

use anyhow::Result;
use tfe_client::{AuditEvent, Pagination};
use time::format_description::well_known::Rfc3339;

use crate::formatters::Formatter;
use crate::formatters::common::format_missing;

/// Table formatter.
pub struct TableFormatter;

fn accessor(event: &AuditEvent) -> String {
    let who = format_missing(Some(event.auth.description.as_str()));
    match event.auth.impersonator_id.as_deref() {
        Some(impersonator) => format!("{who} (via {impersonator})"),
        None => who.to_string(),
    }
}

/// Footer like `Page 2 of 3 (45 events)`.
fn build_pagination_footer(pagination: &Pagination) -> Option<String> {
    if pagination.total_pages == 0 {
        return None;
    }
    let mut footer = format!(
        "Page {} of {} ({} events)",
        pagination.current_page, pagination.total_pages, pagination.total_count
    );
    if let Some(next) = pagination.next_page.filter(|_| pagination.has_next_page()) {
        footer.push_str(&format!(". Next: --page {next}"));
    }
    Some(footer)
}

impl Formatter for TableFormatter {
    fn format_audit_events(
        &self,
        events: &[AuditEvent],
        pagination: Option<&Pagination>,
    ) -> Result<String> {
        if events.is_empty() {
            return Ok("No audit events found.\n".to_string());
        }

        let mut lines = Vec::with_capacity(events.len() + 2);
        lines.push("Timestamp\tType\tAction\tResource\tAccessor".to_string());

        for event in events {
            lines.push(format!(
                "{}\t{}\t{}\t{} {}\t{}",
                event.timestamp.format(&Rfc3339)?,
                event.event_type,
                event.resource.action,
                event.resource.resource_type,
                event.resource.id,
                accessor(event)
            ));
        }

        if let Some(footer) = pagination.and_then(build_pagination_footer) {
            lines.push(String::new());
            lines.push(footer);
        }

        let mut output = lines.join("\n");
        output.push('\n');
        Ok(output)
    }
}
