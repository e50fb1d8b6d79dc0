//! Error types for the CLI wallet.

use bch_core::CoreError;
use bch_network::NetworkError;
use std::error::Error as StdError;
use std::fmt;

/// Errors that can occur in the CLI wallet.
///
/// Validation failures are recoverable: the menu reports them and keeps
/// running. Everything else ends the session.
#[derive(Debug)]
pub enum WalletError {
    /// Error when a file or console operation fails.
    FileError(std::io::Error),

    /// Error when JSON serialization or deserialization fails.
    JsonError(serde_json::Error),

    /// Error when a BIP32 operation fails.
    Bip32Error(bip32::Error),

    /// Error when a chain primitive fails.
    CoreError(CoreError),

    /// Error when a network operation fails.
    NetworkError(NetworkError),

    /// Error when fetching remote metadata fails at the transport level.
    HttpError(String),

    /// Error when a wallet operation fails.
    WalletError(String),

    /// Error when the selected UTXO cannot be used for the operation.
    InvalidSelection(String),

    /// Error when an address entered by the user is invalid.
    InvalidAddress(String),

    /// Error when the selected UTXOs hold too little value.
    InsufficientBalance(String),

    /// Error when the token payloads of the selected UTXOs cannot be merged.
    IncompatibleTokens(String),

    /// Error when a metadata URL is malformed.
    InvalidUrl(String),

    /// Error when a metadata URL does not answer with success.
    MetadataUnavailable(String),

    /// Error when fewer UTXOs exist than the operation needs.
    NotEnoughUtxos {
        /// How many the operation needs
        required: usize,
        /// How many were found
        found: usize,
    },
}

impl WalletError {
    /// Returns whether the menu should report the error and continue.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            WalletError::InvalidSelection(_)
                | WalletError::InvalidAddress(_)
                | WalletError::InsufficientBalance(_)
                | WalletError::IncompatibleTokens(_)
                | WalletError::InvalidUrl(_)
                | WalletError::MetadataUnavailable(_)
                | WalletError::NotEnoughUtxos { .. }
        )
    }
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletError::FileError(e) => write!(f, "File error: {}", e),
            WalletError::JsonError(e) => write!(f, "JSON error: {}", e),
            WalletError::Bip32Error(e) => write!(f, "BIP32 error: {}", e),
            WalletError::CoreError(e) => write!(f, "Transaction error: {}", e),
            WalletError::NetworkError(e) => write!(f, "Network error: {}", e),
            WalletError::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            WalletError::WalletError(msg) => write!(f, "Wallet error: {}", msg),
            WalletError::InvalidSelection(msg) => write!(f, "Invalid selection: {}", msg),
            WalletError::InvalidAddress(msg) => write!(f, "Invalid address: {}", msg),
            WalletError::InsufficientBalance(msg) => write!(f, "Insufficient balance: {}", msg),
            WalletError::IncompatibleTokens(msg) => write!(f, "Incompatible tokens: {}", msg),
            WalletError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            WalletError::MetadataUnavailable(msg) => write!(f, "Metadata unavailable: {}", msg),
            WalletError::NotEnoughUtxos { required, found } => write!(
                f,
                "Not enough UTXOs: need at least {}, found {}",
                required, found
            ),
        }
    }
}

impl StdError for WalletError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            WalletError::FileError(e) => Some(e),
            WalletError::JsonError(e) => Some(e),
            WalletError::CoreError(e) => Some(e),
            WalletError::NetworkError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for WalletError {
    fn from(error: std::io::Error) -> Self {
        WalletError::FileError(error)
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(error: serde_json::Error) -> Self {
        WalletError::JsonError(error)
    }
}

impl From<bip32::Error> for WalletError {
    fn from(error: bip32::Error) -> Self {
        WalletError::Bip32Error(error)
    }
}

impl From<CoreError> for WalletError {
    fn from(error: CoreError) -> Self {
        WalletError::CoreError(error)
    }
}

impl From<NetworkError> for WalletError {
    fn from(error: NetworkError) -> Self {
        WalletError::NetworkError(error)
    }
}

impl From<reqwest::Error> for WalletError {
    fn from(error: reqwest::Error) -> Self {
        WalletError::HttpError(error.to_string())
    }
}
