use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use moneta_cli::agents::OfflineAgentRouter;
use moneta_cli::cli::{Cli, Commands};
use moneta_cli::config::CliConfig;
use moneta_cli::sessions::MemorySessionStore;
use moneta_cli::shell::ShellSession;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else {
        cli.log_level.map(|l| l.as_str()).unwrap_or("off")
    };
    let env_filter = format!("moneta_cli={log_level},moneta_core={log_level}");
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::load(cli.config)?;

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let agents = Arc::new(OfflineAgentRouter::new(&config.agent));
            let store = Arc::new(MemorySessionStore::new());
            let session = ShellSession::new(agents, store, &config);
            session.run().await
        }
    }
}
