//! The interactive top-level menu.

use crate::commands::{combine_inputs, encode_private_key, send_auth_head, show_utxos, update_bcmr};
use crate::errors::WalletError;
use crate::session::Session;
use colored::Colorize;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

/// The menu as shown before every selection.
pub const MENU: &str = "Menu:
    1: Show UTXOs
    2: Send Auth Head
    3: Update Token BCMR
    4: Combine Inputs
    5: Encode Private Key
    6: Exit
";

/// An entry of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// List the UTXOs of an address
    ShowUtxos,
    /// Move a token's authentication head
    SendAuthHead,
    /// Publish a metadata registry reference
    UpdateBcmr,
    /// Merge two UTXOs
    CombineInputs,
    /// Print the wallet key as WIF
    EncodePrivateKey,
    /// Leave the menu
    Exit,
}

impl MenuChoice {
    /// Maps a menu number to its entry.
    pub fn from_selection(selection: i64) -> Option<Self> {
        match selection {
            1 => Some(MenuChoice::ShowUtxos),
            2 => Some(MenuChoice::SendAuthHead),
            3 => Some(MenuChoice::UpdateBcmr),
            4 => Some(MenuChoice::CombineInputs),
            5 => Some(MenuChoice::EncodePrivateKey),
            6 => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Runs the menu until the user exits or a fatal error occurs.
pub async fn run<R: BufRead, W: Write>(session: &mut Session<'_, R, W>) -> Result<(), WalletError> {
    loop {
        session.prompt.say(MENU)?;
        let selection = session.prompt.prompt_int("Choose Selection", Some(0), false)?;
        let choice = match MenuChoice::from_selection(selection) {
            Some(choice) => choice,
            None => {
                session.prompt.say("Unknown selection")?;
                continue;
            }
        };
        debug!("Menu selection {:?}", choice);

        let result = match choice {
            MenuChoice::ShowUtxos => show_utxos::run(session).await,
            MenuChoice::SendAuthHead => send_auth_head::run(session).await.map(drop),
            MenuChoice::UpdateBcmr => update_bcmr::run(session).await.map(drop),
            MenuChoice::CombineInputs => combine_inputs::run(session).await.map(drop),
            MenuChoice::EncodePrivateKey => encode_private_key::run(session).await,
            MenuChoice::Exit => {
                info!("Exiting");
                return Ok(());
            }
        };

        match result {
            Ok(()) => {}
            Err(e) if e.is_recoverable() => {
                warn!("{:?} failed: {}", choice, e);
                session.prompt.say(e.to_string().yellow().to_string())?;
            }
            Err(e) => return Err(e),
        }
    }
}
