//! Encode private key command.

use crate::errors::WalletError;
use crate::session::Session;
use bch_core::Network;
use std::io::{BufRead, Write};
use tracing::debug;

/// Runs the encode-private-key command.
pub async fn run<R: BufRead, W: Write>(session: &mut Session<'_, R, W>) -> Result<(), WalletError> {
    let network = loop {
        let answer = session
            .prompt
            .prompt("Network (mainnet, chipnet, testnet)", None)?;
        match answer.parse::<Network>() {
            Ok(network) if Network::EXPORTABLE.contains(&network) => break network,
            _ => session
                .prompt
                .say(format!("Unknown network '{}'", answer))?,
        }
    };
    debug!("Encoding key for {}", network);

    let wif = session.keys().wif(network);
    session.prompt.say(format!("WIF ({}): {}", network, wif))?;
    Ok(())
}
