//! On-chain position inspection.
//!
//! Enumerates the position NFTs a wallet holds on the PancakeSwap V3
//! NonfungiblePositionManager and reads each position, its pool and its
//! tokens with plain `eth_call`s.

/// ABI word encoding and decoding.
pub mod abi;
/// Known chain deployments.
pub mod chain;
/// The on-chain position source.
pub mod inspector;

pub use chain::ChainConfig;
pub use inspector::{OnChainConfig, OnChainSource};
