//! Range transition events.

use chrono::{DateTime, Utc};
use clmm_monitor_domain::{Position, PositionId, RangeStatus};
use serde::{Deserialize, Serialize};

/// A position whose range classification changed between two snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transition {
    /// Event ID.
    pub id: String,
    /// Position that changed.
    pub position_id: PositionId,
    /// Pool the position belongs to.
    pub pool_id: String,
    /// Classification in the previous snapshot.
    pub previous: RangeStatus,
    /// Classification in the current snapshot.
    pub current: RangeStatus,
    /// When the snapshot that revealed the change was taken.
    pub timestamp: DateTime<Utc>,
    /// The position as fetched in the current snapshot.
    pub snapshot: Position,
}

impl Transition {
    /// Creates a transition from `previous` to the snapshot's current status.
    pub fn new(previous: RangeStatus, snapshot: &Position, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            position_id: snapshot.id.clone(),
            pool_id: snapshot.pool_id.clone(),
            previous,
            current: snapshot.classify(),
            timestamp,
            snapshot: snapshot.clone(),
        }
    }

    /// Whether the position came back into range.
    pub fn entered_range(&self) -> bool {
        self.current.is_in_range()
    }

    /// Short human description of the change.
    pub fn direction(&self) -> &'static str {
        if self.entered_range() {
            "back in range"
        } else {
            "left range"
        }
    }
}
