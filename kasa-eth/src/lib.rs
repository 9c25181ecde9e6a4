//! Ethereum support for the kasa wallet.
//!
//! Provides EIP-55 address derivation from a unified [`kasa::Wallet`],
//! a JSON-RPC balance client and ERC-20 read calls with best-effort
//! token metadata.
//!
//! # Usage
//!
//! ```no_run
//! use kasa::Wallet;
//! use kasa_eth::Deriver;
//!
//! let wallet = Wallet::generate(12, None).unwrap();
//! let deriver = Deriver::new(&wallet);
//! let addr = deriver.derive(0).unwrap();
//! println!("Address: {}", addr.address);
//! ```

#![warn(missing_docs, rust_2018_idioms, clippy::all)]
#![forbid(unsafe_code)]

mod address;
mod deriver;
pub mod erc20;
mod error;
mod network;
mod rpc;

pub use address::{encode_address, parse_address};
pub use deriver::{DerivedAddress, Deriver};
pub use erc20::{TokenBalance, TokenReport};
pub use error::Error;
pub use network::{EthNetwork, ParseNetworkError, RpcSource};
pub use rpc::{EthCall, RpcClient};

/// A convenient Result type alias for kasa-eth operations.
pub type Result<T> = std::result::Result<T, Error>;
