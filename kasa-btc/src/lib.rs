//! Bitcoin support for the kasa wallet.
//!
//! Provides P2PKH address derivation from a unified [`kasa::Wallet`] and a
//! block-explorer balance client.
//!
//! # Usage
//!
//! ```no_run
//! use kasa::Wallet;
//! use kasa_btc::{Deriver, Network};
//!
//! let wallet = Wallet::generate(12, None).unwrap();
//! let deriver = Deriver::new(&wallet, Network::Testnet);
//! let addr = deriver.derive(0).unwrap();
//! println!("Address: {}", addr.address);
//! ```

#![warn(missing_docs, rust_2018_idioms, clippy::all)]
#![forbid(unsafe_code)]

mod address;
mod deriver;
mod error;
mod explorer;
mod network;

pub use address::encode_p2pkh;
pub use deriver::{DerivedAddress, Deriver};
pub use error::Error;
pub use explorer::ExplorerClient;
pub use network::{Network, ParseNetworkError};

/// A convenient Result type alias for kasa-btc operations.
pub type Result<T> = std::result::Result<T, Error>;
