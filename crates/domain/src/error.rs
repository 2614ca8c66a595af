//! Error types for the domain crate.

use thiserror::Error;

/// Errors raised while building domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The wallet address is not a 20-byte hex account identifier.
    #[error("invalid wallet address `{0}`: expected 0x followed by 40 hex digits")]
    InvalidAddress(String),
    /// A math operation left the representable range.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),
    /// An input violated a math precondition.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}
