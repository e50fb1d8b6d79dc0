//! Show UTXOs command.

use crate::commands::fetch_and_render;
use crate::errors::WalletError;
use crate::session::Session;
use bch_core::Address;
use std::io::{BufRead, Write};
use tracing::debug;

/// Runs the show-utxos command.
pub async fn run<R: BufRead, W: Write>(session: &mut Session<'_, R, W>) -> Result<(), WalletError> {
    let own = session.keys().address().encode();
    let answer = session.prompt.prompt("Address", Some(own.as_str()))?;
    let address = Address::decode(&answer, session.network())
        .map_err(|e| WalletError::InvalidAddress(e.to_string()))?;
    debug!("Listing UTXOs of {:?} address {}", address.kind(), address.encode());

    fetch_and_render(session, &address).await?;
    Ok(())
}
