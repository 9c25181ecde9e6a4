//! Kasa - multi-chain wallet generator and balance viewer.
//!
//! Derives Bitcoin and Ethereum addresses from one mnemonic seed and
//! reports native and favorite-token balances.

mod commands;

use clap::Parser;
use commands::{Cli, Commands};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.config;
    match cli.command {
        Commands::Generate(cmd) => cmd.execute()?,
        Commands::AddFavorite(cmd) => cmd.execute(config.as_deref())?,
        Commands::ListFavorites(cmd) => cmd.execute(config.as_deref())?,
        Commands::Balances(cmd) => cmd.execute(config.as_deref()).await?,
    }
    Ok(())
}
