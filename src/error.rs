use std::path::PathBuf;

use thiserror::Error;

/// Fatal startup errors.
///
/// Every variant is reported once on stderr and terminates the process
/// before any connection attempt is made.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("either --url or --file must be given")]
    MissingTarget,

    #[error("must be key=value format: {token}")]
    MalformedHeader { token: String },

    #[error("invalid header {token}: {reason}")]
    InvalidHeader { token: String, reason: String },

    #[error("invalid endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("{reason} in line {line}")]
    MalformedLine { line: usize, reason: String },

    #[error("failed to read target file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("WebSocket error: {0}")]
    WebSocket(Box<tokio_tungstenite::tungstenite::Error>),

    #[error("connection closed")]
    ConnectionClosed,

    #[error("connection error: {0}")]
    Connection(String),
}

// Boxed: tungstenite::Error is large and would dominate the enum's size.
impl From<tokio_tungstenite::tungstenite::Error> for Error {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::WebSocket(Box::new(e))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
