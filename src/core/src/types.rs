//! Core types for the Bitcoin Cash token wallet.

use crate::errors::CoreError;
use crate::transaction::write_compact_size;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Amount in satoshis.
pub type Satoshis = u64;

/// Minimum economically meaningful output amount.
pub const DUST: Satoshis = 1000;

/// Largest fungible amount a single output may carry.
pub const MAX_FUNGIBLE_AMOUNT: u64 = i64::MAX as u64;

/// Marks the start of a token prefix inside an output's bytecode field.
pub const PREFIX_TOKEN: u8 = 0xef;

const HAS_COMMITMENT_LENGTH: u8 = 0x40;
const HAS_NFT: u8 = 0x20;
const HAS_AMOUNT: u8 = 0x10;

/// Capability of a non-fungible token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NftCapability {
    /// Immutable token
    None,
    /// May create one replacement with a different commitment
    Mutable,
    /// May create any number of tokens of the category
    Minting,
}

impl NftCapability {
    fn bits(&self) -> u8 {
        match self {
            NftCapability::None => 0x00,
            NftCapability::Mutable => 0x01,
            NftCapability::Minting => 0x02,
        }
    }
}

/// Non-fungible part of a token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nft {
    /// The capability of the token
    pub capability: NftCapability,
    /// The commitment, hex encoded
    #[serde(default)]
    pub commitment: String,
}

/// Token payload attached to an output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenData {
    /// Category id in display (reversed) byte order, hex encoded
    pub category: String,
    /// Fungible amount, zero when the output carries none
    #[serde(default)]
    pub amount: u64,
    /// Non-fungible token, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nft: Option<Nft>,
}

impl TokenData {
    /// Creates a fungible-only payload.
    pub fn fungible(category: impl Into<String>, amount: u64) -> Self {
        Self {
            category: category.into(),
            amount,
            nft: None,
        }
    }

    /// Returns whether the payload carries a non-fungible token.
    pub fn is_nft(&self) -> bool {
        self.nft.is_some()
    }

    /// Returns the category id in transaction (internal) byte order.
    pub fn category_bytes(&self) -> Result<[u8; 32], CoreError> {
        let mut bytes = hex::decode(&self.category).map_err(|e| CoreError::InvalidHex {
            field: "category",
            reason: e.to_string(),
        })?;
        if bytes.len() != 32 {
            return Err(CoreError::InvalidHex {
                field: "category",
                reason: format!("expected 32 bytes, got {}", bytes.len()),
            });
        }
        bytes.reverse();
        let mut out = [0u8; 32];
        out.copy_from_slice(&bytes);
        Ok(out)
    }

    /// Encodes the token prefix placed before an output's locking bytecode.
    pub fn encode_prefix(&self) -> Result<Vec<u8>, CoreError> {
        if self.amount > MAX_FUNGIBLE_AMOUNT {
            return Err(CoreError::TokenAmountOutOfRange(self.amount));
        }
        let mut prefix = vec![PREFIX_TOKEN];
        prefix.extend_from_slice(&self.category_bytes()?);

        let commitment = match &self.nft {
            Some(nft) => hex::decode(&nft.commitment).map_err(|e| CoreError::InvalidHex {
                field: "commitment",
                reason: e.to_string(),
            })?,
            None => Vec::new(),
        };

        let mut bitfield = 0u8;
        if let Some(nft) = &self.nft {
            bitfield |= HAS_NFT | nft.capability.bits();
            if !commitment.is_empty() {
                bitfield |= HAS_COMMITMENT_LENGTH;
            }
        }
        if self.amount > 0 {
            bitfield |= HAS_AMOUNT;
        }
        prefix.push(bitfield);

        if !commitment.is_empty() {
            write_compact_size(&mut prefix, commitment.len() as u64);
            prefix.extend_from_slice(&commitment);
        }
        if self.amount > 0 {
            write_compact_size(&mut prefix, self.amount);
        }
        Ok(prefix)
    }
}

impl fmt::Display for TokenData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ category: {}, amount: {}", self.category, self.amount)?;
        if let Some(nft) = &self.nft {
            write!(
                f,
                ", nft: {{ capability: {:?}, commitment: {} }}",
                nft.capability, nft.commitment
            )?;
        }
        write!(f, " }}")
    }
}

/// An unspent transaction output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
    /// Funding transaction id in display byte order
    pub txid: String,
    /// Output index within the funding transaction
    pub vout: u32,
    /// Amount in satoshis
    pub satoshis: Satoshis,
    /// Confirmation height, zero while unconfirmed
    #[serde(default)]
    pub height: u32,
    /// Token payload, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<TokenData>,
}

impl Utxo {
    /// Returns the outpoint hash in transaction (internal) byte order.
    pub fn outpoint_hash(&self) -> Result<[u8; 32], CoreError> {
        let mut bytes = hex::decode(&self.txid).map_err(|e| CoreError::InvalidHex {
            field: "txid",
            reason: e.to_string(),
        })?;
        if bytes.len() != 32 {
            return Err(CoreError::InvalidHex {
                field: "txid",
                reason: format!("expected 32 bytes, got {}", bytes.len()),
            });
        }
        bytes.reverse();
        let mut out = [0u8; 32];
        out.copy_from_slice(&bytes);
        Ok(out)
    }
}

impl fmt::Display for Utxo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} {{ satoshis: {}, height: {}",
            self.txid, self.vout, self.satoshis, self.height
        )?;
        match &self.token {
            Some(token) => write!(f, ", token: {} }}", token),
            None => write!(f, ", token: none }}"),
        }
    }
}
