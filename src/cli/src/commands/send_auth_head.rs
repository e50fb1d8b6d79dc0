//! Send auth head command.
//!
//! Moves the authentication head of a token category to a new address. The
//! new head receives a dust output; the rest of the input and its token
//! payload return to the wallet.

use crate::assembler::{send_transaction, Submission};
use crate::commands::{fetch_wallet_utxos, select_utxo};
use crate::errors::WalletError;
use crate::session::Session;
use bch_core::transaction::remaining;
use bch_core::{Address, Input, Output, TransactionDraft, DUST};
use std::io::{BufRead, Write};
use tracing::info;

/// Minimum value, exclusive, an auth head must hold to be moved.
pub const MIN_AUTH_HEAD_VALUE: u64 = 4 * DUST;

/// Runs the send-auth-head command.
pub async fn run<R: BufRead, W: Write>(
    session: &mut Session<'_, R, W>,
) -> Result<Submission, WalletError> {
    let utxos = fetch_wallet_utxos(session).await?;
    let utxo = select_utxo(session, &utxos)?;
    if utxo.satoshis <= MIN_AUTH_HEAD_VALUE {
        return Err(WalletError::InsufficientBalance(format!(
            "auth head holds {} satoshis, more than {} required",
            utxo.satoshis, MIN_AUTH_HEAD_VALUE
        )));
    }

    let network = session.network();
    let destination = loop {
        let answer = session.prompt.prompt("New auth head address", None)?;
        match Address::decode(&answer, network) {
            Ok(address) => break address,
            Err(e) => session.prompt.say(format!("Invalid address: {}", e))?,
        }
    };
    info!("Moving auth head {}:{} to {}", utxo.txid, utxo.vout, destination);

    let unlocker = session.keys().unlocker();
    let change_bytecode = session.keys().locking_bytecode();
    let head_bytecode = destination.locking_bytecode();
    send_transaction(session, |fee| {
        let change = remaining(utxo.satoshis, DUST + fee)?;
        Ok(TransactionDraft::new(
            vec![Input {
                utxo: utxo.clone(),
                unlocker: unlocker.clone(),
            }],
            vec![
                Output::new(head_bytecode.clone(), DUST, None),
                Output::new(change_bytecode.clone(), change, utxo.token.clone()),
            ],
        ))
    })
    .await
}
