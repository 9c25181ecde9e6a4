//! `add-favorite` and `list-favorites` commands.

use std::path::Path;

use clap::Args;
use colored::Colorize;

use super::{open_store, Chain};

/// Add a favorite token to the config.
#[derive(Args)]
pub struct AddFavoriteCommand {
    /// Chain the token lives on.
    #[arg(long, value_enum)]
    chain: Chain,

    /// Token contract address.
    #[arg(long)]
    address: String,

    /// Friendly display name.
    #[arg(long, default_value = "token")]
    name: String,
}

impl AddFavoriteCommand {
    /// Execute the add-favorite command.
    pub fn execute(self, config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
        let mut store = open_store(config)?;
        store.add_favorite(self.chain.key(), self.address.clone(), self.name.clone());
        store.flush()?;

        println!(
            "Added favorite: {} ({}) on {}",
            self.name.green(),
            self.address,
            self.chain.key()
        );
        Ok(())
    }
}

/// List favorite tokens grouped per chain.
#[derive(Args)]
pub struct ListFavoritesCommand {}

impl ListFavoritesCommand {
    /// Execute the list-favorites command.
    pub fn execute(self, config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
        let store = open_store(config)?;

        for (chain, entries) in store.favorites() {
            println!("{}", chain.cyan().bold());
            if entries.is_empty() {
                println!("  {}", "(none)".dimmed());
            }
            for entry in entries {
                println!("  {} {}", entry.name.green(), entry.address.dimmed());
            }
        }
        Ok(())
    }
}
