//! Transition notifications.
//!
//! Delivery is best-effort: a failed or skipped notification never affects
//! the monitoring state.

mod format;
mod notifier;
mod telegram;

pub use format::*;
pub use notifier::*;
pub use telegram::*;
