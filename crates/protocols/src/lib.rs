//! Position sources for the range monitor.
//!
//! Every source maps its own response shape into the normalized
//! [`Position`] type and reports failures as a [`SourceError`]:
//! - [`subgraph`]: indexed GraphQL query service
//! - [`onchain`]: direct inspection of the position manager over JSON-RPC

/// Error types.
pub mod error;
/// On-chain (EVM) position inspection.
pub mod onchain;
/// Prelude module for convenient imports.
pub mod prelude;
/// JSON-RPC transport.
pub mod rpc;
/// Subgraph position source.
pub mod subgraph;

use async_trait::async_trait;
use clmm_monitor_domain::{Position, WalletAddress};

pub use error::SourceError;

/// A backend able to list the liquidity positions owned by a wallet.
///
/// An empty list means the wallet holds no positions; any problem reaching
/// or understanding the backend is an `Err`.
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Fetches the current snapshot of positions for `wallet`.
    async fn fetch_positions(&self, wallet: &WalletAddress) -> Result<Vec<Position>, SourceError>;
}

/// Keeps error bodies short enough for a log line.
pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
