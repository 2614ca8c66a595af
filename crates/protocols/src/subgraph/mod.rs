//! Subgraph (indexed GraphQL) position source.
//!
//! Queries the exchange subgraph for every position whose `account` is the
//! monitored wallet and maps the GraphQL entities into [`Position`]s.
//!
//! [`Position`]: clmm_monitor_domain::Position

/// HTTP client for the subgraph endpoint.
pub mod client;
/// Query construction.
pub mod query;
/// Response shapes and mapping.
pub mod response;

pub use client::{SubgraphConfig, SubgraphSource};
