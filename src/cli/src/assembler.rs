//! Two-pass transaction assembly and the broadcast hand-off.

use crate::errors::WalletError;
use crate::session::Session;
use bch_core::{Satoshis, SignedTransaction, TransactionDraft, DUST};
use colored::Colorize;
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Fee used for the sizing pass.
pub const PLACEHOLDER_FEE: Satoshis = 2 * DUST;

/// The final draft, its signed encoding and the fee it pays.
#[derive(Debug, Clone)]
pub struct Assembled {
    /// The draft built with the final fee
    pub draft: TransactionDraft,
    /// The signed transaction
    pub signed: SignedTransaction,
    /// The fee in satoshis
    pub fee: Satoshis,
}

/// What happened to an assembled transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The transaction was accepted by the network
    Broadcast {
        /// Id returned by the provider
        txid: String,
    },
    /// The user declined and the transaction was printed instead
    Inspected {
        /// Hex encoding of the transaction
        tx_hex: String,
    },
}

/// Builds with a placeholder fee, measures the signed size and rebuilds paying
/// one satoshi per byte plus one.
pub fn assemble<F>(build: F) -> Result<Assembled, WalletError>
where
    F: Fn(Satoshis) -> Result<TransactionDraft, WalletError>,
{
    let sizing = build(PLACEHOLDER_FEE)?.sign()?;
    let fee = sizing.size() as Satoshis + 1;
    debug!("Sizing pass produced {} bytes, fee {}", sizing.size(), fee);

    let draft = build(fee)?;
    let signed = draft.sign()?;
    Ok(Assembled { draft, signed, fee })
}

/// Assembles a transaction and broadcasts it if the user confirms.
pub async fn send_transaction<R, W, F>(
    session: &mut Session<'_, R, W>,
    build: F,
) -> Result<Submission, WalletError>
where
    R: BufRead,
    W: Write,
    F: Fn(Satoshis) -> Result<TransactionDraft, WalletError>,
{
    let assembled = assemble(build)?;
    session.prompt.say(format!(
        "Transaction: {} bytes, fee {} satoshis",
        assembled.signed.size(),
        assembled.fee
    ))?;

    if session.prompt.prompt_bool("Broadcast transaction?", false)? {
        let txid = session
            .provider()
            .broadcast(&assembled.signed.to_hex())
            .await?;
        info!("Broadcast transaction {}", txid);
        session
            .prompt
            .say(format!("{} {}", "Transaction broadcast:".green(), txid))?;
        return Ok(Submission::Broadcast { txid });
    }

    let tx_hex = assembled.signed.to_hex();
    let txid = assembled.signed.txid();
    info!("Inspecting unbroadcast transaction {}", txid);
    session.prompt.say(format!("Transaction id: {}", txid))?;
    session.prompt.say(format!("Transaction hex: {}", tx_hex))?;
    for (index, input) in assembled.draft.inputs.iter().enumerate() {
        session
            .prompt
            .say(format!("Input ({}) token: {}", index, describe(&input.utxo.token)))?;
    }
    for (index, output) in assembled.draft.outputs.iter().enumerate() {
        let marker = if output.is_data_carrier() { " (data carrier)" } else { "" };
        session.prompt.say(format!(
            "Output ({}) token: {}{}",
            index,
            describe(&output.token),
            marker
        ))?;
    }
    Ok(Submission::Inspected { tx_hex })
}

fn describe<T: std::fmt::Display>(token: &Option<T>) -> String {
    match token {
        Some(token) => token.to_string(),
        None => "none".to_string(),
    }
}
