//! In-memory stand-ins for the network provider and the metadata fetcher.

use async_trait::async_trait;
use bch_cli::{FetchedDocument, MetadataFetcher, Prompt, Session, Wallet, WalletError, WalletKeys};
use bch_core::{Address, Network, TokenData, Utxo};
use bch_network::{NetworkError, NetworkProvider};
use std::io::Cursor;
use std::sync::Mutex;

/// A 24-word mnemonic with all-zero entropy.
pub const PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon \
                          abandon abandon abandon abandon abandon abandon abandon abandon \
                          abandon abandon abandon abandon abandon abandon abandon art";

/// Txid returned for every accepted broadcast.
pub const BROADCAST_TXID: &str = "feedfacefeedfacefeedfacefeedfacefeedfacefeedfacefeedfacefeedface";

/// Scripted console used by the tests.
pub type ScriptedPrompt = Prompt<Cursor<Vec<u8>>, Vec<u8>>;

/// A provider serving a fixed UTXO set and recording broadcasts.
#[derive(Debug, Default)]
pub struct MockProvider {
    utxos: Vec<Utxo>,
    fail: bool,
    queries: Mutex<Vec<String>>,
    broadcasts: Mutex<Vec<String>>,
}

impl MockProvider {
    /// Serves `utxos` for every address.
    pub fn new(utxos: Vec<Utxo>) -> Self {
        Self {
            utxos,
            ..Self::default()
        }
    }

    /// Fails every call with a connection error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Addresses passed to `get_utxos`.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    /// Transactions passed to `broadcast`.
    pub fn broadcasts(&self) -> Vec<String> {
        self.broadcasts.lock().unwrap().clone()
    }
}

#[async_trait]
impl NetworkProvider for MockProvider {
    async fn get_utxos(&self, address: &Address) -> Result<Vec<Utxo>, NetworkError> {
        if self.fail {
            return Err(NetworkError::ConnectionClosed("mock".to_string()));
        }
        self.queries.lock().unwrap().push(address.encode());
        Ok(self.utxos.clone())
    }

    async fn broadcast(&self, tx_hex: &str) -> Result<String, NetworkError> {
        if self.fail {
            return Err(NetworkError::ConnectionClosed("mock".to_string()));
        }
        self.broadcasts.lock().unwrap().push(tx_hex.to_string());
        Ok(BROADCAST_TXID.to_string())
    }
}

/// A fetcher answering every URL with the same document.
#[derive(Debug)]
pub struct MockFetcher {
    document: FetchedDocument,
    fetched: Mutex<Vec<String>>,
}

impl MockFetcher {
    /// Answers with `status` and `body`.
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            document: FetchedDocument {
                status,
                body: body.as_bytes().to_vec(),
            },
            fetched: Mutex::new(Vec::new()),
        }
    }

    /// URLs that were fetched.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedDocument, WalletError> {
        self.fetched.lock().unwrap().push(url.to_string());
        Ok(self.document.clone())
    }
}

/// Keys of the test wallet at `index`.
pub fn keys(index: u32) -> WalletKeys {
    Wallet::from_mnemonic(PHRASE, index)
        .unwrap()
        .keys(Network::Mainnet)
        .unwrap()
}

/// A console that answers with the lines of `input`.
pub fn scripted(input: &str) -> ScriptedPrompt {
    Prompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

/// A session over the test wallet.
pub fn session<'a>(
    provider: &'a MockProvider,
    fetcher: &'a MockFetcher,
    input: &str,
) -> Session<'a, Cursor<Vec<u8>>, Vec<u8>> {
    Session::new(keys(0), provider, fetcher, scripted(input))
}

/// Everything the session printed so far.
pub fn printed(session: &Session<'_, Cursor<Vec<u8>>, Vec<u8>>) -> String {
    String::from_utf8_lossy(session.prompt.output()).into_owned()
}

/// A wallet UTXO with a distinct funding txid per `vout`.
pub fn utxo(vout: u32, satoshis: u64, token: Option<TokenData>) -> Utxo {
    Utxo {
        txid: format!("{:02x}", vout + 1).repeat(32),
        vout,
        satoshis,
        height: 800_000,
        token,
    }
}

/// An output read back from an encoded transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedOutput {
    /// Amount in satoshis
    pub satoshis: u64,
    /// Token prefix and locking bytecode as encoded
    pub script: Vec<u8>,
}

/// Reads the outputs of a hex-encoded transaction.
pub fn decode_outputs(tx_hex: &str) -> Vec<DecodedOutput> {
    let bytes = hex::decode(tx_hex).unwrap();
    let mut reader = Reader { bytes: &bytes, pos: 4 };

    let inputs = reader.compact_size();
    for _ in 0..inputs {
        reader.take(36);
        let len = reader.compact_size() as usize;
        reader.take(len);
        reader.take(4);
    }

    let outputs = reader.compact_size();
    (0..outputs)
        .map(|_| {
            let mut value = [0u8; 8];
            value.copy_from_slice(reader.take(8));
            let len = reader.compact_size() as usize;
            DecodedOutput {
                satoshis: u64::from_le_bytes(value),
                script: reader.take(len).to_vec(),
            }
        })
        .collect()
}

/// Returns the fee the assembler reported in `printed` output.
pub fn reported_fee(printed: &str) -> u64 {
    let line = printed
        .lines()
        .find(|line| line.contains("Transaction:"))
        .unwrap();
    let after = line.split(", fee ").nth(1).unwrap();
    after.split_whitespace().next().unwrap().parse().unwrap()
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> &'a [u8] {
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        slice
    }

    fn compact_size(&mut self) -> u64 {
        match self.take(1)[0] {
            0xfd => {
                let raw = self.take(2);
                u16::from_le_bytes([raw[0], raw[1]]) as u64
            }
            n => n as u64,
        }
    }
}
