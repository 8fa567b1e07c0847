//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Bind global connection flags to their `TFE_*` environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `commands` module).
//! - Does not validate connection settings (see `tfe_config::ConfigLoader`).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::commands::read::ReadArgs;

#[derive(Parser)]
#[command(name = "tfe-audit")]
#[command(about = "Read an organization's audit trail from Terraform Enterprise / HCP Terraform", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  tfe-audit read\n  tfe-audit read --since 2024-05-01T00:00:00Z --all -o ndjson\n  tfe-audit --base-url https://tfe.example.com read --page 2 --page-size 50\n"
)]
pub struct Cli {
    /// Base URL of the service (e.g., https://app.terraform.io)
    #[arg(short, long, global = true, env = "TFE_ADDRESS")]
    pub base_url: Option<String>,

    /// Organization token used to read the audit trail
    #[arg(short, long, global = true, env = "TFE_ORGANIZATION_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "TFE_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Maximum number of retries for rate-limited requests
    #[arg(long, global = true, env = "TFE_MAX_RETRIES")]
    pub max_retries: Option<usize>,

    /// Maximum requests per second
    #[arg(long, global = true, env = "TFE_RATE_LIMIT")]
    pub rate_limit: Option<u32>,

    /// Skip TLS certificate verification (for self-signed certificates)
    #[arg(long, global = true)]
    pub skip_verify: bool,

    /// Also retry 5xx responses and connection failures
    #[arg(long, global = true)]
    pub retry_server_errors: bool,

    /// Output format (table, json, ndjson)
    #[arg(short, long, global = true, default_value = "table")]
    pub output: String,

    /// Output file path (saves results to file instead of stdout)
    #[arg(long, global = true, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Log line format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read audit events
    Read(ReadArgs),
}

/// Format of diagnostic log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}
