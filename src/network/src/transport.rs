//! Newline-delimited JSON-RPC transport to an Electrum server.

use crate::errors::NetworkError;
use crate::types::{Request, Response};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::debug;

/// Electrum protocol version negotiated on connect.
pub const PROTOCOL_VERSION: &str = "1.4";

/// A client that opens one connection per request.
#[derive(Debug, Clone)]
pub struct ElectrumClient {
    server: String,
    client_name: String,
}

impl ElectrumClient {
    /// Creates a client for `server` given as `host:port`.
    pub fn new(server: impl Into<String>, client_name: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            client_name: client_name.into(),
        }
    }

    /// Returns the server this client talks to.
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Negotiates the protocol version and performs a single request.
    pub async fn request(&self, method: &str, params: Vec<Value>) -> Result<Value, NetworkError> {
        let stream = TcpStream::connect(&self.server).await?;
        let (reader, mut writer) = stream.into_split();
        let mut lines = BufReader::new(reader).lines();

        let handshake = Request::new(
            0,
            "server.version",
            vec![
                Value::from(self.client_name.as_str()),
                Value::from(PROTOCOL_VERSION),
            ],
        );
        let request = Request::new(1, method, params);
        for message in [&handshake, &request] {
            let mut line = serde_json::to_vec(message)?;
            line.push(b'\n');
            writer.write_all(&line).await?;
        }
        writer.flush().await?;
        debug!("Sent {} to {}", method, self.server);

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let response: Response = serde_json::from_str(&line)?;
            match response.id {
                Some(0) => {
                    let version = response.into_result("server.version")?;
                    debug!("Server version: {}", version);
                }
                Some(1) => return response.into_result(method),
                _ => debug!("Ignoring unsolicited message: {}", line),
            }
        }

        Err(NetworkError::ConnectionClosed(self.server.clone()))
    }
}
