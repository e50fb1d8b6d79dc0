//! Configuration for the CLI wallet.

use anyhow::Result;
use bch_core::Network;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for the CLI wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    /// The network to operate on
    pub network: Network,
    /// The Electrum server to connect to, as `host:port`
    pub electrum_server: String,
    /// The client name announced to the server
    #[serde(default = "default_client_name")]
    pub client_name: String,
}

fn default_client_name() -> String {
    "bch-wallet".to_string()
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self::for_network(Network::Mainnet)
    }
}

impl WalletConfig {
    /// Returns the default configuration for `network`.
    pub fn for_network(network: Network) -> Self {
        Self {
            network,
            electrum_server: default_server(network).to_string(),
            client_name: default_client_name(),
        }
    }

    /// Loads configuration from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

/// Returns the default Electrum server for `network`.
pub fn default_server(network: Network) -> &'static str {
    match network {
        Network::Mainnet => "bch.imaginary.cash:50001",
        Network::Chipnet => "chipnet.imaginary.cash:50001",
        Network::Testnet => "localhost:60001",
        Network::Regtest => "localhost:50001",
    }
}
