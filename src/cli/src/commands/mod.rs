//! Commands for the CLI wallet.

pub mod combine_inputs;
pub mod encode_private_key;
pub mod init_seed;
pub mod send_auth_head;
pub mod show_utxos;
pub mod update_bcmr;

use crate::errors::WalletError;
use crate::session::Session;
use bch_core::{Address, Utxo};
use std::io::{BufRead, Write};
use tracing::debug;

/// Lists the UTXOs of `address` and prints them with their indices.
pub async fn fetch_and_render<R: BufRead, W: Write>(
    session: &mut Session<'_, R, W>,
    address: &Address,
) -> Result<Vec<Utxo>, WalletError> {
    let utxos = session.provider().get_utxos(address).await?;
    debug!("Fetched {} UTXOs for {}", utxos.len(), address);

    session.prompt.say(format!("Found '{}' UTXOs", utxos.len()))?;
    for (index, utxo) in utxos.iter().enumerate() {
        session.prompt.say(format!("Input ({}): {}", index, utxo))?;
    }
    Ok(utxos)
}

/// Lists and prints the wallet's own UTXOs.
pub async fn fetch_wallet_utxos<R: BufRead, W: Write>(
    session: &mut Session<'_, R, W>,
) -> Result<Vec<Utxo>, WalletError> {
    let address = session.keys().address().clone();
    fetch_and_render(session, &address).await
}

/// Asks for the index of one UTXO out of `utxos`.
pub fn select_utxo<R: BufRead, W: Write>(
    session: &mut Session<'_, R, W>,
    utxos: &[Utxo],
) -> Result<Utxo, WalletError> {
    if utxos.is_empty() {
        return Err(WalletError::NotEnoughUtxos {
            required: 1,
            found: 0,
        });
    }
    let index = session
        .prompt
        .prompt_index("Select UTXO index", utxos.len(), None)?;
    Ok(utxos[index].clone())
}
