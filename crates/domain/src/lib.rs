//! Domain model for concentrated-liquidity range monitoring.
//!
//! This crate holds the normalized types every position source maps into:
//! - Positions and their token holdings
//! - Tick ranges and the in-range classification
//! - Wallet addresses
//! - Tick and liquidity math used for display amounts

/// Position and token entities.
pub mod entities;
/// Enumerations shared across crates.
pub mod enums;
/// Domain errors.
pub mod error;
/// Tick and liquidity math.
pub mod math;
/// Value objects.
pub mod value_objects;

pub use entities::{Position, PositionId, TokenHolding};
pub use enums::RangeStatus;
pub use error::DomainError;
pub use value_objects::{TickRange, WalletAddress};
