use crate::tracking::Transition;
use chrono::{DateTime, Utc};
use clmm_monitor_domain::Position;
use std::fmt;

/// Result of the fetch step of a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The source returned a snapshot, possibly empty.
    Fetched,
    /// The source failed; the state store was left untouched.
    Failed {
        /// Short failure class, e.g. `timeout` or `status`.
        kind: &'static str,
        message: String,
    },
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Fetched)
    }
}

/// Delivery tally for one cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryStats {
    pub sent: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Heartbeat step result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartbeatStatus {
    Disabled,
    Sent,
    Failed,
}

/// Everything one cycle observed and did.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub timestamp: DateTime<Utc>,
    pub fetch: FetchOutcome,
    /// Snapshot returned by the source; empty on failure.
    pub positions: Vec<Position>,
    /// Classification changes detected this cycle, in snapshot order.
    pub transitions: Vec<Transition>,
    pub notifications: DeliveryStats,
    pub heartbeat: HeartbeatStatus,
}

fn short_pool(pool_id: &str) -> String {
    if pool_id.chars().count() > 10 {
        let head: String = pool_id.chars().take(10).collect();
        format!("{head}...")
    } else {
        pool_id.to_string()
    }
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== LP status @ {} ===",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        )?;

        if let FetchOutcome::Failed { kind, message } = &self.fetch {
            return write!(f, "Fetch failed ({kind}): {message}");
        }

        if self.positions.is_empty() {
            return write!(f, "No positions found");
        }

        for (i, position) in self.positions.iter().enumerate() {
            let status = position.classify();
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{} {} | Pool: {} | Tick={} | Range={} | LQ={:.2e}",
                status.emoji(),
                status,
                short_pool(&position.pool_id),
                position.tick_current,
                position.range,
                position.liquidity as f64,
            )?;
        }
        Ok(())
    }
}
