//! tfe-audit - Command-line reader for an organization's audit trail.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Build configuration and run commands via the shared client library.
//! - Map failures to structured exit codes.
//!
//! Does NOT handle:
//! - REST API implementation (see `crates/client`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing to allow `.env` to provide clap defaults.
//! - Logs go to stderr; stdout carries only command output.

mod args;
mod cancellation;
mod commands;
mod error;
mod formatters;

use anyhow::Result;
use args::{Cli, LogFormat};
use cancellation::{is_cancelled_error, print_cancelled_message};
use clap::Parser;
use commands::run_command;
use error::{ExitCode, ExitCodeExt};
use secrecy::SecretString;
use tfe_client::CancellationToken;
use tfe_config::{Config, ConfigLoader};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

/// Layer CLI flags over environment variables and defaults.
fn build_config(cli: &Cli) -> Result<Config> {
    let mut loader = ConfigLoader::new().from_env()?;

    // Blank values are ignored to allow fallback to the environment
    if let Some(url) = cli.base_url.as_deref().filter(|s| !s.trim().is_empty()) {
        loader = loader.with_base_url(url.to_string());
    }
    if let Some(token) = cli.token.as_deref().filter(|s| !s.trim().is_empty()) {
        loader = loader.with_token(SecretString::new(token.trim().to_string().into()));
    }
    if let Some(timeout_secs) = cli.timeout {
        loader = loader.with_timeout(std::time::Duration::from_secs(timeout_secs));
    }
    if let Some(retries) = cli.max_retries {
        loader = loader.with_max_retries(retries);
    }
    if let Some(rate) = cli.rate_limit {
        loader = loader.with_rate_limit_per_second(rate);
    }
    if cli.skip_verify {
        loader = loader.with_skip_verify(true);
    }
    if cli.retry_server_errors {
        loader = loader.with_retry_server_errors(true);
    }

    Ok(loader.build()?)
}

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();
    init_logging(cli.log_format);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to build configuration: {:#}", e);
            std::process::exit(e.exit_code().as_i32());
        }
    };

    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        cancel_clone.cancel();
    });

    let exit_code = match run_command(cli, config, &cancel).await {
        Ok(()) => ExitCode::Success,
        Err(e) if is_cancelled_error(&e) => {
            print_cancelled_message();
            ExitCode::Interrupted
        }
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
