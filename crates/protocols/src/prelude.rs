//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use clmm_monitor_protocols::prelude::*;
//! ```

pub use crate::onchain::{ChainConfig, OnChainConfig, OnChainSource};
pub use crate::rpc::{JsonRpcClient, RpcConfig};
pub use crate::subgraph::{SubgraphConfig, SubgraphSource};
pub use crate::{PositionSource, SourceError};
