//! The context shared by every menu operation.

use crate::metadata::MetadataFetcher;
use crate::prompt::Prompt;
use crate::wallet::WalletKeys;
use bch_core::Network;
use bch_network::NetworkProvider;

/// Services resolved once at startup and handed to every command.
pub struct Session<'a, R, W> {
    keys: WalletKeys,
    provider: &'a dyn NetworkProvider,
    fetcher: &'a dyn MetadataFetcher,
    /// Console used for questions and results
    pub prompt: Prompt<R, W>,
}

impl<'a, R, W> Session<'a, R, W> {
    /// Creates a session.
    pub fn new(
        keys: WalletKeys,
        provider: &'a dyn NetworkProvider,
        fetcher: &'a dyn MetadataFetcher,
        prompt: Prompt<R, W>,
    ) -> Self {
        Self {
            keys,
            provider,
            fetcher,
            prompt,
        }
    }

    /// Returns the wallet's key material.
    pub fn keys(&self) -> &WalletKeys {
        &self.keys
    }

    /// Returns the configured network.
    pub fn network(&self) -> Network {
        self.keys.network()
    }

    /// Returns the network provider.
    pub fn provider(&self) -> &'a dyn NetworkProvider {
        self.provider
    }

    /// Returns the metadata fetcher.
    pub fn fetcher(&self) -> &'a dyn MetadataFetcher {
        self.fetcher
    }
}
