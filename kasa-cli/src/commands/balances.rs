//! `balances` command: native balance plus favorite-token balances.

use std::path::Path;

use clap::Args;
use colored::Colorize;
use kasa_eth::{EthNetwork, RpcClient, RpcSource};
use kasa_store::ConfigStore;
use tracing::debug;

use super::{open_store, Chain};

/// Show native and favorite-token balances for a wallet address.
#[derive(Args)]
pub struct BalancesCommand {
    /// Chain to query.
    #[arg(long, value_enum)]
    chain: Chain,

    /// Wallet address to query.
    #[arg(long)]
    address: String,

    /// Explicit RPC endpoint (Ethereum only).
    #[arg(long)]
    rpc: Option<String>,

    /// Network name; falls back to the configured chain default.
    #[arg(long)]
    network: Option<String>,
}

impl BalancesCommand {
    /// Execute the balances command.
    pub async fn execute(self, config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
        let store = open_store(config)?;

        match self.chain {
            Chain::Eth => self.eth_balances(&store).await,
            Chain::Btc => self.btc_balance(&store).await,
        }
    }

    async fn eth_balances(&self, store: &ConfigStore) -> Result<(), Box<dyn std::error::Error>> {
        let network: EthNetwork = self
            .network
            .as_deref()
            .or_else(|| store.default_network("eth"))
            .unwrap_or("mainnet")
            .parse()?;

        // Endpoint resolution order: explicit flag, config entry, named
        // network default. Resolved once; no silent provider fallback.
        let source = if let Some(url) = &self.rpc {
            RpcSource::Endpoint(url.clone())
        } else if let Some(url) = store.rpc_endpoint(&format!("eth_{network}")) {
            RpcSource::Endpoint(url.to_string())
        } else {
            RpcSource::Network(network)
        };
        debug!(endpoint = %source.url(), "resolved RPC endpoint");

        let client = RpcClient::new(&source)?;

        let native = client.balance(&self.address).await?;
        println!("{} {}", "ETH balance:".cyan().bold(), native.green());

        let favorites: Vec<(String, String)> = store
            .favorites_for("eth")
            .iter()
            .map(|entry| (entry.address.clone(), entry.name.clone()))
            .collect();

        for report in kasa_eth::erc20::batch_token_balances(&client, &self.address, &favorites).await
        {
            match report.result {
                Ok(balance) => println!(
                    "{} ({}): {} {}",
                    report.name.green(),
                    report.address.dimmed(),
                    balance.amount,
                    balance.symbol
                ),
                Err(err) => println!(
                    "{} ({}): {}",
                    report.name.green(),
                    report.address.dimmed(),
                    format!("error: {err}").red()
                ),
            }
        }

        Ok(())
    }

    async fn btc_balance(&self, store: &ConfigStore) -> Result<(), Box<dyn std::error::Error>> {
        let network: kasa_btc::Network = self
            .network
            .as_deref()
            .or_else(|| store.default_network("btc"))
            .unwrap_or("testnet")
            .parse()?;

        let client = kasa_btc::ExplorerClient::new(network)?;

        // A failed lookup is reported, not raised; nothing else depends on it.
        match client.balance(&self.address).await {
            Ok(balance) => println!("{} {}", "BTC balance:".cyan().bold(), balance.green()),
            Err(err) => println!("{} {}", "BTC balance:".cyan().bold(), format!("error: {err}").red()),
        }

        Ok(())
    }
}
