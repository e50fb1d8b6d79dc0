//! Fetching of off-chain token metadata.

use crate::errors::WalletError;
use async_trait::async_trait;
use tracing::debug;

/// A fetched document: the HTTP status and the raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedDocument {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: Vec<u8>,
}

impl FetchedDocument {
    /// Returns whether the server answered 200.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Retrieves metadata documents by URL.
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    /// Performs a GET on `url`. Non-success statuses are returned, not raised.
    async fn fetch(&self, url: &str) -> Result<FetchedDocument, WalletError>;
}

/// A fetcher backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a default client.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MetadataFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedDocument, WalletError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        debug!("GET {} -> {} ({} bytes)", url, status, body.len());

        Ok(FetchedDocument { status, body })
    }
}
