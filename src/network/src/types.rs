//! Electrum protocol message types.

use crate::errors::NetworkError;
use bch_core::types::{Nft, NftCapability, TokenData, Utxo, MAX_FUNGIBLE_AMOUNT};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A JSON-RPC 2.0 request.
#[derive(Clone, Debug, Serialize)]
pub struct Request<'a> {
    /// Always "2.0"
    pub jsonrpc: &'static str,
    /// Request id, echoed by the server
    pub id: u64,
    /// The Electrum method
    pub method: &'a str,
    /// Positional parameters
    pub params: Vec<Value>,
}

impl<'a> Request<'a> {
    /// Creates a request.
    pub fn new(id: u64, method: &'a str, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

/// A JSON-RPC 2.0 response.
#[derive(Clone, Debug, Deserialize)]
pub struct Response {
    /// The id of the request being answered; absent on notifications
    #[serde(default)]
    pub id: Option<u64>,
    /// The result on success
    #[serde(default)]
    pub result: Option<Value>,
    /// The error on failure
    #[serde(default)]
    pub error: Option<Value>,
}

impl Response {
    /// Turns the response into its result, mapping server errors.
    pub fn into_result(self, method: &str) -> Result<Value, NetworkError> {
        if let Some(error) = self.error {
            if !error.is_null() {
                let message = error
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| error.to_string());
                return Err(NetworkError::Rpc {
                    method: method.to_string(),
                    message,
                });
            }
        }
        Ok(self.result.unwrap_or(Value::Null))
    }
}

/// An entry of `blockchain.address.listunspent`.
#[derive(Clone, Debug, Deserialize)]
pub struct ListUnspentEntry {
    /// Confirmation height, zero for mempool entries
    #[serde(default)]
    pub height: i64,
    /// Funding transaction id
    pub tx_hash: String,
    /// Output index
    pub tx_pos: u32,
    /// Amount in satoshis
    pub value: u64,
    /// Token payload, present on token-aware servers
    #[serde(default)]
    pub token_data: Option<TokenDataEntry>,
}

/// Token payload as reported by the server.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenDataEntry {
    /// Fungible amount, reported as a decimal string
    #[serde(default, deserialize_with = "amount_from_string_or_number")]
    pub amount: u64,
    /// Category id in display byte order
    pub category: String,
    /// Non-fungible token, if any
    #[serde(default)]
    pub nft: Option<NftEntry>,
}

/// Non-fungible token as reported by the server.
#[derive(Clone, Debug, Deserialize)]
pub struct NftEntry {
    /// "none", "mutable" or "minting"
    pub capability: NftCapability,
    /// Hex commitment
    #[serde(default)]
    pub commitment: String,
}

fn amount_from_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = match Value::deserialize(deserializer)? {
        Value::String(s) => s.parse::<u64>().map_err(de::Error::custom)?,
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| de::Error::custom(format!("invalid token amount {}", n)))?,
        Value::Null => 0,
        other => return Err(de::Error::custom(format!("invalid token amount {}", other))),
    };
    if amount > MAX_FUNGIBLE_AMOUNT {
        return Err(de::Error::custom(format!("token amount {} out of range", amount)));
    }
    Ok(amount)
}

impl From<ListUnspentEntry> for Utxo {
    fn from(entry: ListUnspentEntry) -> Self {
        Utxo {
            txid: entry.tx_hash,
            vout: entry.tx_pos,
            satoshis: entry.value,
            height: entry.height.max(0) as u32,
            token: entry.token_data.map(|token| TokenData {
                category: token.category,
                amount: token.amount,
                nft: token.nft.map(|nft| Nft {
                    capability: nft.capability,
                    commitment: nft.commitment,
                }),
            }),
        }
    }
}
