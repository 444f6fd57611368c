//! `limitedwip` entry point.

use anyhow::Result;
use clap::Parser;

use limitedwip_cli::cli::{Cli, dispatch_command};
use limitedwip_cli::logging::setup_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.log_level.as_filter_str(), cli.json_logs);
    dispatch_command(cli).await
}
