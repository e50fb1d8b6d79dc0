//! Network layer for the Bitcoin Cash token wallet.
//!
//! This crate talks to an Electrum server to list unspent outputs and to
//! broadcast signed transactions, behind the `NetworkProvider` trait.

pub mod errors;
pub mod provider;
pub mod transport;
pub mod types;

// Re-export commonly used types
pub use errors::NetworkError;
pub use provider::{ElectrumProvider, NetworkProvider};
pub use transport::ElectrumClient;
