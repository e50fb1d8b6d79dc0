//! Chain primitives for the Bitcoin Cash token wallet.
//!
//! This crate provides the types and encodings the wallet needs to build and
//! sign transactions: network parameters, CashAddr, WIF keys, CashTokens
//! payloads, script helpers and P2PKH signing.

pub mod cashaddr;
pub mod errors;
pub mod keys;
pub mod network;
pub mod script;
pub mod transaction;
pub mod types;

// Re-export commonly used types
pub use cashaddr::{Address, AddressKind};
pub use errors::CoreError;
pub use keys::PrivateKey;
pub use network::Network;
pub use transaction::{Input, Output, P2pkhUnlocker, SignedTransaction, TransactionDraft};
pub use types::{Nft, NftCapability, Satoshis, TokenData, Utxo, DUST, MAX_FUNGIBLE_AMOUNT};
