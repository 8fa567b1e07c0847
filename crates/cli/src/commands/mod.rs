//! Command implementations.

pub mod read;

use anyhow::Result;
use tfe_client::CancellationToken;
use tfe_config::Config;

use crate::args::{Cli, Commands};

/// Run the parsed subcommand.
pub async fn run_command(cli: Cli, config: Config, cancel: &CancellationToken) -> Result<()> {
    match cli.command {
        Commands::Read(args) => {
            read::run(
                config,
                args,
                &cli.output,
                cli.output_file.as_ref(),
                cancel,
            )
            .await
        }
    }
}
