//! Liveness and usage reporting to an external collector.

mod payload;
mod reporter;

pub use payload::*;
pub use reporter::*;
