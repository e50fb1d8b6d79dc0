//! Network parameters.

use crate::errors::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A Bitcoin Cash network the wallet can operate on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// The main network
    #[default]
    Mainnet,
    /// The public test network for upcoming upgrades
    Chipnet,
    /// The legacy public test network
    Testnet,
    /// A local regression test network
    Regtest,
}

impl Network {
    /// Networks a private key may be exported for.
    pub const EXPORTABLE: [Network; 3] = [Network::Mainnet, Network::Chipnet, Network::Testnet];

    /// Returns the CashAddr human-readable prefix.
    pub fn cashaddr_prefix(&self) -> &'static str {
        match self {
            Network::Mainnet => "bitcoincash",
            Network::Chipnet | Network::Testnet => "bchtest",
            Network::Regtest => "bchreg",
        }
    }

    /// Returns the WIF version byte.
    pub fn wif_version(&self) -> u8 {
        match self {
            Network::Mainnet => 0x80,
            _ => 0xef,
        }
    }

    /// Returns the lowercase network name.
    pub fn name(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Chipnet => "chipnet",
            Network::Testnet => "testnet",
            Network::Regtest => "regtest",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "chipnet" => Ok(Network::Chipnet),
            "testnet" => Ok(Network::Testnet),
            "regtest" => Ok(Network::Regtest),
            other => Err(CoreError::UnknownNetwork(other.to_string())),
        }
    }
}
