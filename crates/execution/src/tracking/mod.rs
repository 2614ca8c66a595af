//! Range state tracking.
//!
//! Keeps the last observed classification of every position and turns
//! each fresh snapshot into the list of range transitions it implies.

mod events;
mod state;

pub use events::*;
pub use state::*;
