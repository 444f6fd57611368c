//! Command dispatch.

use anyhow::Result;

use super::args::{Cli, Commands};

pub async fn dispatch_command(cli: Cli) -> Result<()> {
    let config = cli.config.as_deref();
    match cli.command {
        Commands::CheckConfig(check_cli) => check_cli.run(config),
        Commands::PrintDefaultConfig(print_cli) => print_cli.run(config),
        Commands::Replay(replay_cli) => replay_cli.run(config),
        Commands::Run(run_cli) => run_cli.run(config).await,
    }
}
