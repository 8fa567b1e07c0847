//! Audit-trail read command.
//!
//! Responsibilities:
//! - Turn `--since`, `--page` and `--page-size` into read options
//! - Read one page, or every page with `--all`
//! - Format output via shared formatters
//!
//! Does NOT handle:
//! - Direct REST API calls (handled by client crate)
//! - Output formatting details (see formatters module)
//!
//! Invariants:
//! - Without `--since`, `--page` or `--page-size` the request carries no query string
//! - Flags are validated before any request is sent

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use secrecy::ExposeSecret;
use tfe_client::{AuditTrailReadOptions, AuditTrails, CancellationToken, TfeClient};
use tfe_config::Config;
use tfe_config::constants::MAX_PAGE_SIZE;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::info;

use crate::cancellation::run_cancellable;
use crate::error::InvalidInput;
use crate::formatters::{OutputFormat, get_formatter, output_result};

#[derive(Debug, Args)]
pub struct ReadArgs {
    /// Only events after this instant (RFC 3339, e.g. 2024-05-01T00:00:00Z)
    #[arg(long)]
    pub since: Option<String>,

    /// Page number to read (1-based)
    #[arg(long, conflicts_with = "all")]
    pub page: Option<u32>,

    /// Events per page (1-100)
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Follow pagination and read every page
    #[arg(long)]
    pub all: bool,
}

fn parse_since(raw: &str) -> Result<OffsetDateTime> {
    OffsetDateTime::parse(raw.trim(), &Rfc3339).map_err(|e| {
        InvalidInput(format!(
            "Invalid --since value '{raw}': expected RFC 3339 (e.g. 2024-05-01T00:00:00Z): {e}"
        ))
        .into()
    })
}

fn validate_page_size(page_size: Option<u32>) -> Result<Option<u32>> {
    match page_size {
        Some(size) if size == 0 || size > MAX_PAGE_SIZE => Err(InvalidInput(format!(
            "Invalid --page-size value {size}: must be between 1 and {MAX_PAGE_SIZE}"
        ))
        .into()),
        other => Ok(other),
    }
}

/// Read options, or `None` when no flag asks for any.
fn read_options(
    since: Option<OffsetDateTime>,
    page: Option<u32>,
    page_size: Option<u32>,
) -> Option<AuditTrailReadOptions> {
    if since.is_none() && page.is_none() && page_size.is_none() {
        return None;
    }
    let mut options = AuditTrailReadOptions::new();
    options.since = since;
    options.list_options.page_number = page;
    options.list_options.page_size = page_size;
    Some(options)
}

pub async fn run(
    config: Config,
    args: ReadArgs,
    output_format: &str,
    output_file: Option<&PathBuf>,
    cancel: &CancellationToken,
) -> Result<()> {
    let format: OutputFormat = output_format.parse()?;
    let since = args.since.as_deref().map(parse_since).transpose()?;
    let page_size = validate_page_size(args.page_size)?;
    let token = config
        .require_token()
        .context("Cannot read the audit trail")?
        .expose_secret()
        .to_string();

    let client = TfeClient::builder()
        .from_config(&config)
        .build()
        .context("Failed to create client")?;
    let reader = client.audit_trails();
    let formatter = get_formatter(format);

    let output = if args.all {
        info!("Reading every audit trail page");
        let events = run_cancellable(
            cancel,
            reader.read_all(&token, since, page_size, cancel),
        )
        .await
        .context("Failed to read audit trail")?;
        formatter.format_audit_events(&events, None)?
    } else {
        let options = read_options(since, args.page, page_size);
        let list = run_cancellable(cancel, reader.read(&token, options.as_ref(), cancel))
            .await
            .context("Failed to read audit trail")?;
        formatter.format_audit_events(&list.items, Some(&list.pagination))?
    };

    output_result(&output, format, output_file)
}
