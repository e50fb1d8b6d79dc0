//! Initialize seed command for the CLI wallet.

use crate::errors::WalletError;
use crate::wallet::Wallet;
use std::path::Path;
use tracing::info;

/// Runs the init-seed command.
pub fn run<P: AsRef<Path>>(wallet_path: P) -> Result<Wallet, WalletError> {
    let wallet_path = wallet_path.as_ref();
    if wallet_path.exists() {
        return Err(WalletError::WalletError(format!(
            "Wallet file already exists at {}",
            wallet_path.display()
        )));
    }

    let wallet = Wallet::new()?;
    wallet.save(wallet_path)?;
    info!("Wallet saved to {}", wallet_path.display());

    Ok(wallet)
}
