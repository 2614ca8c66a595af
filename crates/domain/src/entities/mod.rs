pub mod position;
pub mod token;

// Re-export for easier access
pub use position::{Position, PositionId};
pub use token::TokenHolding;
