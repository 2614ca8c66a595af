//! Monitoring engine for concentrated-liquidity positions.
//!
//! This crate drives the polling loop:
//! - Range state tracking and snapshot diffing
//! - Transition alerts delivered through a [`alerts::Notifier`]
//! - Optional heartbeat reporting of fetch statistics
//! - The [`monitor::PositionMonitor`] cycle and its status report

/// Prelude module for convenient imports.
pub mod prelude;

/// Transition notifications.
pub mod alerts;
/// Heartbeat reporting.
pub mod heartbeat;
/// Polling loop.
pub mod monitor;
/// Range state and transitions.
pub mod tracking;
