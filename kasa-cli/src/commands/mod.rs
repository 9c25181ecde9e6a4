//! CLI command definitions and handlers.

mod balances;
mod favorites;
mod generate;

use std::path::{Path, PathBuf};

pub use balances::BalancesCommand;
use clap::{Parser, Subcommand, ValueEnum};
pub use favorites::{AddFavoriteCommand, ListFavoritesCommand};
pub use generate::GenerateCommand;
use kasa_store::ConfigStore;

/// Kasa - multi-chain wallet generator and balance viewer.
#[derive(Parser)]
#[command(name = "kasa")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file (defaults to the platform config dir).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a mnemonic and derive an address.
    Generate(GenerateCommand),

    /// Add a favorite token (e.g. an ERC-20 contract).
    #[command(name = "add-favorite")]
    AddFavorite(AddFavoriteCommand),

    /// List favorite tokens.
    #[command(name = "list-favorites")]
    ListFavorites(ListFavoritesCommand),

    /// Show native balance and favorite-token balances for an address.
    Balances(BalancesCommand),
}

/// Supported chains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Chain {
    /// Bitcoin
    Btc,
    /// Ethereum
    Eth,
}

impl Chain {
    /// Key used for this chain in the config file.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Btc => "btc",
            Self::Eth => "eth",
        }
    }
}

/// Open the favorites store at the explicit path or the default location.
pub(crate) fn open_store(config: Option<&Path>) -> kasa_store::Result<ConfigStore> {
    match config {
        Some(path) => ConfigStore::open(path),
        None => ConfigStore::open_default(),
    }
}
