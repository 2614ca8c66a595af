//! Failures reported by position sources.

use thiserror::Error;

/// Why a position source could not produce a snapshot.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network failure or timeout, with the request URL stripped.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// The endpoint answered with a non-success HTTP status.
    #[error("unexpected HTTP status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Start of the response body.
        body: String,
    },
    /// The query service reported errors for the query.
    #[error("query error: {0}")]
    Query(String),
    /// The JSON-RPC endpoint returned an error object.
    #[error("JSON-RPC error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code.
        code: i64,
        /// Error message.
        message: String,
    },
    /// The response could not be mapped into positions.
    #[error("malformed response: {0}")]
    Malformed(String),
    /// The RPC endpoint serves a different chain than configured.
    #[error("chain id mismatch: configured {expected}, endpoint reports {actual}")]
    ChainMismatch {
        /// Configured chain id.
        expected: u64,
        /// Chain id reported by the endpoint.
        actual: u64,
    },
    /// The source could not be constructed.
    #[error("initialization failed: {0}")]
    Init(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.without_url())
    }
}

impl SourceError {
    /// Short label for structured logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(e) if e.is_timeout() => "timeout",
            Self::Transport(_) => "transport",
            Self::Status { .. } => "status",
            Self::Query(_) => "query",
            Self::Rpc { .. } => "rpc",
            Self::Malformed(_) => "malformed",
            Self::ChainMismatch { .. } => "chain_mismatch",
            Self::Init(_) => "init",
        }
    }
}
