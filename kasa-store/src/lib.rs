//! Favorites and configuration store for the kasa wallet.
//!
//! The store is an explicit handle over one JSON config file: open it,
//! mutate in memory, flush. Every flush rewrites the whole file through
//! an atomic replace; there is no partial patching and no ambient global
//! state.
//!
//! # Usage
//!
//! ```no_run
//! use kasa_store::ConfigStore;
//!
//! let mut store = ConfigStore::open_default().unwrap();
//! store.add_favorite("eth", "0xdac17f958d2ee523a2206206994597c13d831ec7", "tether");
//! store.flush().unwrap();
//! ```

#![warn(missing_docs, rust_2018_idioms, clippy::all)]
#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Errors that can occur while loading or persisting the config file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Filesystem access failed.
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file holds invalid JSON.
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// No config directory could be determined for this platform.
    #[error("no config directory available")]
    NoConfigDir,
}

/// A convenient Result type alias for store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A favorite token entry.
///
/// Entries are append-only: duplicates are permitted and order is
/// preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    /// Token contract address.
    pub address: String,
    /// User-chosen display name.
    pub name: String,
}

/// The persisted configuration record.
///
/// Field names stay camelCase on disk for compatibility with configs
/// written by earlier versions of the tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Favorite tokens, grouped per chain.
    pub favorites: BTreeMap<String, Vec<FavoriteEntry>>,
    /// Default network name per chain.
    pub default_networks: BTreeMap<String, String>,
    /// Named RPC endpoint overrides.
    pub rpc: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        let mut favorites = BTreeMap::new();
        favorites.insert("eth".to_string(), Vec::new());
        favorites.insert("btc".to_string(), Vec::new());

        let mut default_networks = BTreeMap::new();
        default_networks.insert("eth".to_string(), "mainnet".to_string());
        default_networks.insert("btc".to_string(), "testnet".to_string());

        let mut rpc = BTreeMap::new();
        rpc.insert("eth_mainnet".to_string(), String::new());
        rpc.insert("eth_testnet".to_string(), String::new());

        Self {
            favorites,
            default_networks,
            rpc,
        }
    }
}

/// Handle over the config file.
///
/// Lifecycle: [`open`](Self::open) -> mutate -> [`flush`](Self::flush).
/// Mutations only touch memory until flushed.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    config: Config,
}

impl ConfigStore {
    /// Open the store at the platform's default config location.
    ///
    /// # Errors
    ///
    /// Returns an error if no config directory exists or the file cannot
    /// be read or created.
    pub fn open_default() -> Result<Self> {
        let dir = dirs::config_dir().ok_or(Error::NoConfigDir)?;
        Self::open(dir.join("kasa").join("config.json"))
    }

    /// Open the store at an explicit path.
    ///
    /// A missing or unreadable file is replaced with defaults, which are
    /// written out immediately so the file always exists after opening.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(config) => Ok(Self { path, config }),
                Err(err) => {
                    debug!(path = %path.display(), %err, "config unreadable, rewriting defaults");
                    Self::create_default(path)
                }
            },
            Err(_) => Self::create_default(path),
        }
    }

    fn create_default(path: PathBuf) -> Result<Self> {
        let store = Self {
            path,
            config: Config::default(),
        };
        store.flush()?;
        Ok(store)
    }

    /// Get the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the current configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Append a favorite entry under a chain.
    ///
    /// No dedup and no address validation: two identical adds yield two
    /// entries. Call [`flush`](Self::flush) to persist.
    pub fn add_favorite(
        &mut self,
        chain: impl Into<String>,
        address: impl Into<String>,
        name: impl Into<String>,
    ) {
        self.config
            .favorites
            .entry(chain.into())
            .or_default()
            .push(FavoriteEntry {
                address: address.into(),
                name: name.into(),
            });
    }

    /// Get the favorites, grouped per chain in insertion order.
    #[must_use]
    pub fn favorites(&self) -> &BTreeMap<String, Vec<FavoriteEntry>> {
        &self.config.favorites
    }

    /// Get the favorites for one chain.
    #[must_use]
    pub fn favorites_for(&self, chain: &str) -> &[FavoriteEntry] {
        self.config
            .favorites
            .get(chain)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Get the configured default network for a chain, if any.
    #[must_use]
    pub fn default_network(&self, chain: &str) -> Option<&str> {
        self.config
            .default_networks
            .get(chain)
            .map(String::as_str)
    }

    /// Get a configured RPC endpoint, treating empty strings as unset.
    #[must_use]
    pub fn rpc_endpoint(&self, key: &str) -> Option<&str> {
        self.config
            .rpc
            .get(key)
            .map(String::as_str)
            .filter(|url| !url.is_empty())
    }

    /// Rewrite the whole config file atomically.
    ///
    /// The new content lands in a temporary file in the same directory
    /// and replaces the config in one rename, so concurrent readers
    /// never observe a torn file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or renamed.
    pub fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let tmp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(tmp.as_file(), &self.config)?;
        tmp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        debug!(path = %self.path.display(), "config flushed");
        Ok(())
    }
}
