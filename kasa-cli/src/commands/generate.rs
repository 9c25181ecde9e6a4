//! `generate` command: new mnemonic plus a derived address.

use clap::Args;
use colored::Colorize;
use kasa::Wallet;

use super::Chain;

/// Generate a mnemonic and derive an address for the chosen chain.
#[derive(Args)]
pub struct GenerateCommand {
    /// Chain to derive an address for.
    #[arg(long, value_enum, default_value = "btc")]
    chain: Chain,

    /// Network to use (Bitcoin only; Ethereum addresses are network-independent).
    #[arg(long, default_value = "testnet")]
    network: String,

    /// Address index within the account.
    #[arg(long, default_value = "0")]
    index: u32,

    /// Number of mnemonic words (12, 15, 18, 21, or 24).
    #[arg(long, default_value = "12")]
    words: usize,

    /// BIP39 passphrase (optional extra security).
    #[arg(long)]
    passphrase: Option<String>,
}

impl GenerateCommand {
    /// Execute the generate command.
    pub fn execute(self) -> Result<(), Box<dyn std::error::Error>> {
        let wallet = Wallet::generate(self.words, self.passphrase.as_deref())?;

        println!();
        println!(
            "      {}     {}",
            "Mnemonic".cyan().bold(),
            wallet.mnemonic()
        );
        println!(
            "      {}  do not share it; it controls all derived keys",
            "Warning".yellow().bold()
        );
        if wallet.has_passphrase() {
            println!("      {}   {}", "Passphrase".cyan().bold(), "(set)".dimmed());
        }
        println!();

        match self.chain {
            Chain::Btc => {
                let network: kasa_btc::Network = self.network.parse()?;
                let deriver = kasa_btc::Deriver::new(&wallet, network);
                let derived = deriver.derive(self.index)?;

                println!("      {}      {}", "Network".cyan().bold(), network);
                println!("      {}         {}", "Path".cyan().bold(), derived.path);
                println!(
                    "      {}      {}",
                    "Address".cyan().bold(),
                    derived.address.green()
                );
            }
            Chain::Eth => {
                let deriver = kasa_eth::Deriver::new(&wallet);
                let derived = deriver.derive(self.index)?;

                println!("      {}         {}", "Path".cyan().bold(), derived.path);
                println!(
                    "      {}      {}",
                    "Address".cyan().bold(),
                    derived.address.green()
                );
            }
        }
        println!();

        Ok(())
    }
}
