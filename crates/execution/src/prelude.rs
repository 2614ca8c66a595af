//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use clmm_monitor_execution::prelude::*;
//! ```

// Alerts
pub use crate::alerts::{
    DeliveryTarget, Notifier, NotifyError, NotifyOutcome, TelegramConfig, TelegramNotifier,
};

// Heartbeat
pub use crate::heartbeat::{HeartbeatConfig, HeartbeatError, HeartbeatReporter, HttpHeartbeat};

// Monitor
pub use crate::monitor::{
    CycleReport, DeliveryStats, FetchOutcome, HeartbeatStatus, MonitorConfig, PositionMonitor,
    RunCounters,
};

// Tracking
pub use crate::tracking::{RangeStateStore, Transition};
