/// Error types for the network crate.
use std::error::Error as StdError;
use std::fmt;

/// Errors that can occur in the network crate.
#[derive(Debug)]
pub enum NetworkError {
    /// Error when the connection to the server fails.
    Io(std::io::Error),

    /// Error when a request or response cannot be (de)serialized.
    SerializationError(String),

    /// Error when the server answers a request with a JSON-RPC error.
    Rpc {
        /// The method that failed
        method: String,
        /// The error object returned by the server
        message: String,
    },

    /// Error when a response is well-formed JSON but not what was expected.
    InvalidResponse(String),

    /// Error when the server closes the connection before answering.
    ConnectionClosed(String),
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::Io(e) => write!(f, "I/O error: {}", e),
            NetworkError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            NetworkError::Rpc { method, message } => {
                write!(f, "Server rejected {}: {}", method, message)
            }
            NetworkError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            NetworkError::ConnectionClosed(server) => {
                write!(f, "Connection to {} closed before a response arrived", server)
            }
        }
    }
}

impl StdError for NetworkError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            NetworkError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for NetworkError {
    fn from(error: std::io::Error) -> Self {
        NetworkError::Io(error)
    }
}

impl From<serde_json::Error> for NetworkError {
    fn from(error: serde_json::Error) -> Self {
        NetworkError::SerializationError(error.to_string())
    }
}

impl From<bch_core::CoreError> for NetworkError {
    fn from(error: bch_core::CoreError) -> Self {
        NetworkError::InvalidResponse(error.to_string())
    }
}
