//! Update token BCMR command.
//!
//! Publishes a metadata registry reference: an OP_RETURN output carrying
//! `BCMR`, the SHA-256 of the registry document and its URL.

use crate::assembler::{send_transaction, Submission};
use crate::commands::{fetch_wallet_utxos, select_utxo};
use crate::errors::WalletError;
use crate::session::Session;
use bch_core::keys::sha256;
use bch_core::transaction::remaining;
use bch_core::{Input, Output, TransactionDraft, DUST};
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Minimum value, exclusive, of the UTXO paying for the update.
pub const MIN_FUNDING_VALUE: u64 = 2 * DUST;

/// Protocol identifier pushed first in the data-carrier output.
pub const BCMR_TAG: &[u8] = b"BCMR";

const HTTPS: &str = "https://";

/// Checks that `url` is an `https://` URL without a trailing slash.
pub fn validate_bcmr_url(url: &str) -> Result<(), WalletError> {
    if !url.starts_with(HTTPS) {
        return Err(WalletError::InvalidUrl(format!(
            "'{}' must start with {}",
            url, HTTPS
        )));
    }
    if url.ends_with('/') {
        return Err(WalletError::InvalidUrl(format!(
            "'{}' must not end with '/'",
            url
        )));
    }
    Ok(())
}

/// Returns the URL as stored on chain: no scheme, no trailing whitespace.
pub fn onchain_url(url: &str) -> &str {
    url.strip_prefix(HTTPS).unwrap_or(url).trim_end()
}

/// Runs the update-bcmr command.
pub async fn run<R: BufRead, W: Write>(
    session: &mut Session<'_, R, W>,
) -> Result<Submission, WalletError> {
    let utxos = fetch_wallet_utxos(session).await?;
    let utxo = select_utxo(session, &utxos)?;
    if utxo.satoshis <= MIN_FUNDING_VALUE {
        return Err(WalletError::InsufficientBalance(format!(
            "UTXO holds {} satoshis, more than {} required",
            utxo.satoshis, MIN_FUNDING_VALUE
        )));
    }
    if utxo.token.is_some() {
        return Err(WalletError::InvalidSelection(
            "the UTXO paying for a BCMR update must not carry tokens".to_string(),
        ));
    }

    let url = session.prompt.prompt("BCMR URL", None)?;
    validate_bcmr_url(&url)?;

    let document = session.fetcher().fetch(&url).await?;
    if !document.is_ok() {
        return Err(WalletError::MetadataUnavailable(format!(
            "{} answered with status {}",
            url, document.status
        )));
    }
    let digest = sha256(&document.body);
    debug!("BCMR document digest {}", hex::encode(digest));

    let carrier = Output::data_carrier(&[BCMR_TAG, &digest[..], onchain_url(&url).as_bytes()])?;
    info!("Publishing BCMR reference {}", url);

    let unlocker = session.keys().unlocker();
    let change_bytecode = session.keys().locking_bytecode();
    send_transaction(session, |fee| {
        let change = remaining(utxo.satoshis, fee)?;
        Ok(TransactionDraft::new(
            vec![Input {
                utxo: utxo.clone(),
                unlocker: unlocker.clone(),
            }],
            vec![
                Output::new(change_bytecode.clone(), change, None),
                carrier.clone(),
            ],
        ))
    })
    .await
}
