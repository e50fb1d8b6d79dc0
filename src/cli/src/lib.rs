//! Interactive single-key wallet for Bitcoin Cash token authorities.

pub mod assembler;
pub mod commands;
pub mod config;
pub mod errors;
pub mod menu;
pub mod metadata;
pub mod prompt;
pub mod session;
pub mod wallet;

// Re-export commonly used types and functions
pub use assembler::{assemble, send_transaction, Assembled, Submission};
pub use config::WalletConfig;
pub use errors::WalletError;
pub use metadata::{FetchedDocument, HttpFetcher, MetadataFetcher};
pub use prompt::Prompt;
pub use session::Session;
pub use wallet::{Wallet, WalletKeys};
