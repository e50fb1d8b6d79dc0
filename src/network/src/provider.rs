//! The network provider seam used by the wallet.

use crate::errors::NetworkError;
use crate::transport::ElectrumClient;
use crate::types::ListUnspentEntry;
use async_trait::async_trait;
use bch_core::{Address, Utxo};
use serde_json::Value;
use tracing::{debug, info};

/// Remote access to the UTXO set and the mempool.
#[async_trait]
pub trait NetworkProvider: Send + Sync {
    /// Lists the unspent outputs locked to `address`.
    async fn get_utxos(&self, address: &Address) -> Result<Vec<Utxo>, NetworkError>;

    /// Submits a hex-encoded transaction, returning its id.
    async fn broadcast(&self, tx_hex: &str) -> Result<String, NetworkError>;
}

/// A provider backed by an Electrum (Fulcrum) server.
#[derive(Debug, Clone)]
pub struct ElectrumProvider {
    client: ElectrumClient,
}

impl ElectrumProvider {
    /// Creates a provider for `server` (`host:port`).
    pub fn new(server: impl Into<String>, client_name: impl Into<String>) -> Self {
        Self {
            client: ElectrumClient::new(server, client_name),
        }
    }
}

#[async_trait]
impl NetworkProvider for ElectrumProvider {
    async fn get_utxos(&self, address: &Address) -> Result<Vec<Utxo>, NetworkError> {
        let encoded = address.encode();
        debug!("Listing UTXOs for {} via {}", encoded, self.client.server());
        let result = self
            .client
            .request("blockchain.address.listunspent", vec![Value::from(encoded)])
            .await?;
        let entries: Vec<ListUnspentEntry> = serde_json::from_value(result)?;
        Ok(entries.into_iter().map(Utxo::from).collect())
    }

    async fn broadcast(&self, tx_hex: &str) -> Result<String, NetworkError> {
        let result = self
            .client
            .request("blockchain.transaction.broadcast", vec![Value::from(tx_hex)])
            .await?;
        let txid = result
            .as_str()
            .ok_or_else(|| {
                NetworkError::InvalidResponse(format!("expected a txid, got {}", result))
            })?
            .to_string();
        info!("Broadcast accepted: {}", txid);
        Ok(txid)
    }
}
