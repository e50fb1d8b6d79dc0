//! Combine inputs command.

use crate::assembler::{send_transaction, Submission};
use crate::commands::fetch_wallet_utxos;
use crate::errors::WalletError;
use crate::session::Session;
use bch_core::transaction::remaining;
use bch_core::{Input, Output, TokenData, TransactionDraft, DUST, MAX_FUNGIBLE_AMOUNT};
use std::io::{BufRead, Write};
use tracing::info;

/// Minimum combined value, exclusive, of the two inputs.
pub const MIN_COMBINED_VALUE: u64 = 4 * DUST;

/// Merges the token payloads of two inputs into the payload of one output.
///
/// Only fungible tokens of a single category can be merged. A plain input
/// may be merged with a tokenized one.
pub fn combine_tokens(
    first: Option<&TokenData>,
    second: Option<&TokenData>,
) -> Result<Option<TokenData>, WalletError> {
    if first.map_or(false, TokenData::is_nft) || second.map_or(false, TokenData::is_nft) {
        return Err(WalletError::IncompatibleTokens(
            "inputs carrying NFTs cannot be combined".to_string(),
        ));
    }

    match (first, second) {
        (Some(a), Some(b)) if a.category != b.category => Err(WalletError::IncompatibleTokens(
            format!("categories {} and {} differ", a.category, b.category),
        )),
        (Some(a), Some(b)) => {
            let amount = a
                .amount
                .checked_add(b.amount)
                .filter(|amount| *amount <= MAX_FUNGIBLE_AMOUNT)
                .ok_or_else(|| {
                    WalletError::IncompatibleTokens(format!(
                        "combined token amount exceeds {}",
                        MAX_FUNGIBLE_AMOUNT
                    ))
                })?;
            Ok(Some(TokenData::fungible(a.category.clone(), amount)))
        }
        (Some(token), None) | (None, Some(token)) => Ok(Some(token.clone())),
        (None, None) => Ok(None),
    }
}

/// Runs the combine-inputs command.
pub async fn run<R: BufRead, W: Write>(
    session: &mut Session<'_, R, W>,
) -> Result<Submission, WalletError> {
    let utxos = fetch_wallet_utxos(session).await?;
    if utxos.len() < 2 {
        return Err(WalletError::NotEnoughUtxos {
            required: 2,
            found: utxos.len(),
        });
    }

    let first = session
        .prompt
        .prompt_index("First UTXO index", utxos.len(), None)?;
    let second = session
        .prompt
        .prompt_index("Second UTXO index", utxos.len(), Some(first))?;
    let inputs = [utxos[first].clone(), utxos[second].clone()];

    let total = inputs[0].satoshis + inputs[1].satoshis;
    if total <= MIN_COMBINED_VALUE {
        return Err(WalletError::InsufficientBalance(format!(
            "inputs hold {} satoshis, more than {} required",
            total, MIN_COMBINED_VALUE
        )));
    }
    let token = combine_tokens(inputs[0].token.as_ref(), inputs[1].token.as_ref())?;
    info!("Combining inputs {} and {} ({} satoshis)", first, second, total);

    let unlocker = session.keys().unlocker();
    let bytecode = session.keys().locking_bytecode();
    send_transaction(session, |fee| {
        Ok(TransactionDraft::new(
            inputs
                .iter()
                .map(|utxo| Input {
                    utxo: utxo.clone(),
                    unlocker: unlocker.clone(),
                })
                .collect(),
            vec![Output::new(bytecode.clone(), remaining(total, fee)?, token.clone())],
        ))
    })
    .await
}
