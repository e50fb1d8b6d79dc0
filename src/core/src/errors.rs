//! Error types for the core crate.

use thiserror::Error;

/// Errors that can occur in the core crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Error when a CashAddr string cannot be decoded.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Error when a CashAddr belongs to another network.
    #[error("Address prefix mismatch: expected {expected}, got {actual}")]
    NetworkMismatch {
        /// The prefix of the configured network
        expected: String,
        /// The prefix found in the address
        actual: String,
    },

    /// Error when a network name is not recognised.
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    /// Error when a WIF string cannot be decoded.
    #[error("Invalid WIF: {0}")]
    InvalidWif(String),

    /// Error when a private key is out of range for secp256k1.
    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    /// Error when a hex field (txid, category, commitment) is malformed.
    #[error("Invalid hex in {field}: {reason}")]
    InvalidHex {
        /// The field being decoded
        field: &'static str,
        /// What went wrong
        reason: String,
    },

    /// Error when the outputs of a draft spend more than its inputs provide.
    #[error("Insufficient funds: outputs require {required}, inputs provide {available}")]
    InsufficientFunds {
        /// The amount the outputs need
        required: u64,
        /// The amount the inputs provide
        available: u64,
    },

    /// Error when a push exceeds the supported data size.
    #[error("Push of {0} bytes is too large")]
    PushTooLarge(usize),

    /// Error when a draft has no inputs or no outputs.
    #[error("Transaction draft is empty: {0}")]
    EmptyDraft(&'static str),

    /// Error when a fungible token amount exceeds the consensus maximum.
    #[error("Token amount {0} exceeds the maximum fungible amount")]
    TokenAmountOutOfRange(u64),

    /// Error when an input index is past the end of a draft.
    #[error("No input at index {0}")]
    InputOutOfRange(usize),

    /// Error when signing an input fails.
    #[error("Signing failed: {0}")]
    SigningFailed(String),
}
