//! Wallet implementation for the CLI.

use crate::errors::WalletError;
use bch_core::{Address, Network, P2pkhUnlocker, PrivateKey};
use bip32::{DerivationPath, Language, Mnemonic, XPrv};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

/// SLIP-44 coin type for Bitcoin Cash.
const COIN_TYPE: u32 = 145;

/// A single-key wallet backed by a BIP39 mnemonic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    /// The BIP39 mnemonic for the wallet
    mnemonic: String,
    /// The index of the receiving key in use
    account_index: u32,
}

impl Wallet {
    /// Creates a new wallet with a random mnemonic.
    pub fn new() -> Result<Self, WalletError> {
        let mnemonic = Mnemonic::random(OsRng, Language::English);

        Ok(Self {
            mnemonic: mnemonic.phrase().to_string(),
            account_index: 0,
        })
    }

    /// Restores a wallet from an existing mnemonic.
    pub fn from_mnemonic(phrase: &str, account_index: u32) -> Result<Self, WalletError> {
        let mnemonic = Mnemonic::new(phrase.trim(), Language::English)?;

        Ok(Self {
            mnemonic: mnemonic.phrase().to_string(),
            account_index,
        })
    }

    /// Loads a wallet from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, WalletError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let wallet = serde_json::from_str(&contents)?;
        Ok(wallet)
    }

    /// Saves a wallet to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), WalletError> {
        let contents = serde_json::to_string_pretty(self)?;

        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = File::create(path)?;
        file.write_all(contents.as_bytes())?;

        Ok(())
    }

    /// Gets the mnemonic for the wallet.
    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    /// Gets the current account index.
    pub fn account_index(&self) -> u32 {
        self.account_index
    }

    /// Returns the derivation path of the wallet key.
    pub fn derivation_path(&self) -> String {
        format!("m/44'/{}'/0'/0/{}", COIN_TYPE, self.account_index)
    }

    /// Derives the private key for the current account.
    pub fn private_key(&self) -> Result<PrivateKey, WalletError> {
        let mnemonic = Mnemonic::new(self.mnemonic.as_str(), Language::English)?;
        let seed = mnemonic.to_seed("");
        let path: DerivationPath = self.derivation_path().parse()?;
        let xprv = XPrv::derive_from_path(seed, &path)?;

        Ok(PrivateKey::new(xprv.private_key().clone()))
    }

    /// Resolves the key material used for the rest of the session.
    pub fn keys(&self, network: Network) -> Result<WalletKeys, WalletError> {
        Ok(WalletKeys::new(self.private_key()?, network))
    }
}

/// Key material derived once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct WalletKeys {
    network: Network,
    private_key: PrivateKey,
    address: Address,
}

impl WalletKeys {
    /// Wraps a private key for `network`.
    pub fn new(private_key: PrivateKey, network: Network) -> Self {
        let address = private_key.address(network);
        Self {
            network,
            private_key,
            address,
        }
    }

    /// Returns the network the keys were resolved for.
    pub fn network(&self) -> Network {
        self.network
    }

    /// Returns the wallet's P2PKH address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Returns the token-aware form of the wallet's address.
    pub fn token_address(&self) -> Address {
        self.address.clone().with_token_support(true)
    }

    /// Returns the locking bytecode of the wallet's address.
    pub fn locking_bytecode(&self) -> Vec<u8> {
        self.address.locking_bytecode()
    }

    /// Returns a capability that signs inputs locked to the wallet.
    pub fn unlocker(&self) -> P2pkhUnlocker {
        P2pkhUnlocker::new(self.private_key.clone())
    }

    /// Encodes the private key as WIF for `network`.
    pub fn wif(&self, network: Network) -> String {
        self.private_key.to_wif(network)
    }
}
