//! # Kasa - Multi-Chain Wallet Core Library
//!
//! Core cryptographic primitives for deterministic multi-chain wallets:
//! BIP-39 mnemonics and seed stretching, BIP-32 hierarchical key
//! derivation, and the address encodings (Base58Check, EIP-55) shared by
//! the chain-specific crates.
//!
//! ## Features
//!
//! - **Deterministic derivation**: the same mnemonic, passphrase and path
//!   always reproduce the same keys and addresses
//! - **Modern cryptography**: built on k256, sha2/sha3 and other audited
//!   RustCrypto libraries
//! - **Secure by design**: seeds and private keys are zeroized on drop

#![warn(missing_docs, rust_2018_idioms, clippy::all)]
#![forbid(unsafe_code)]

pub mod encoding;
pub mod error;
pub mod hash;
pub mod hdpath;
pub mod seed;
pub mod units;
pub mod wallet;
pub mod xkey;

pub use error::{Error, Result};
pub use hdpath::{ChildIndex, DerivationPath};
pub use wallet::Wallet;
pub use xkey::{Xprv, Xpub};
