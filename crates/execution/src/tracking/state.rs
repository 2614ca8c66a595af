//! Process-lifetime range state and snapshot diffing.

use super::Transition;
use chrono::{DateTime, Utc};
use clmm_monitor_domain::{Position, PositionId, RangeStatus};
use std::collections::HashMap;
use tracing::debug;

/// Last observed classification per position.
///
/// Entries are created on first sight and overwritten on change. They are
/// never removed: a position that disappears from the source keeps its
/// last entry, which is simply never revisited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeStateStore {
    statuses: HashMap<PositionId, RangeStatus>,
}

impl RangeStateStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known status of a position.
    pub fn get(&self, id: &PositionId) -> Option<RangeStatus> {
        self.statuses.get(id).copied()
    }

    /// Number of positions ever observed.
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    /// Whether nothing has been observed yet.
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Iterates over all known statuses.
    pub fn iter(&self) -> impl Iterator<Item = (&PositionId, RangeStatus)> {
        self.statuses.iter().map(|(id, status)| (id, *status))
    }

    /// Folds a snapshot into the store and returns the transitions it caused.
    ///
    /// First sight of an id records a baseline without emitting anything.
    /// Transitions follow the order of `snapshot`.
    pub fn apply(&mut self, snapshot: &[Position], at: DateTime<Utc>) -> Vec<Transition> {
        let mut transitions = Vec::new();

        for position in snapshot {
            let current = position.classify();
            match self.statuses.insert(position.id.clone(), current) {
                None => {
                    debug!(position = %position.id, status = %current, "Recorded baseline status");
                }
                Some(previous) if previous != current => {
                    transitions.push(Transition::new(previous, position, at));
                }
                Some(_) => {}
            }
        }

        transitions
    }
}

/// Diffs `snapshot` against `previous`, returning the updated state and
/// the transitions, leaving `previous` untouched.
pub fn diff(
    previous: &RangeStateStore,
    snapshot: &[Position],
    at: DateTime<Utc>,
) -> (RangeStateStore, Vec<Transition>) {
    let mut updated = previous.clone();
    let transitions = updated.apply(snapshot, at);
    (updated, transitions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clmm_monitor_domain::TickRange;

    fn position(id: &str, lower: i32, upper: i32, tick: i32) -> Position {
        Position::new(id, "0xpool", TickRange::new(lower, upper), tick, 1_000)
    }

    #[test]
    fn test_first_sight_is_baseline() {
        let mut store = RangeStateStore::new();
        let transitions = store.apply(&[position("1", -100, 100, 500)], Utc::now());

        assert!(transitions.is_empty());
        assert_eq!(store.get(&"1".into()), Some(RangeStatus::OutOfRange));
    }

    #[test]
    fn test_unchanged_status_emits_nothing() {
        let mut store = RangeStateStore::new();
        store.apply(&[position("1", -100, 100, 50)], Utc::now());
        let transitions = store.apply(&[position("1", -100, 100, -20)], Utc::now());

        assert!(transitions.is_empty());
        assert_eq!(store.get(&"1".into()), Some(RangeStatus::InRange));
    }

    #[test]
    fn test_flip_emits_one_transition() {
        let mut store = RangeStateStore::new();
        store.apply(&[position("1", -100, 100, 50)], Utc::now());
        let transitions = store.apply(&[position("1", -100, 100, 150)], Utc::now());

        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].previous, RangeStatus::InRange);
        assert_eq!(transitions[0].current, RangeStatus::OutOfRange);
        assert_eq!(transitions[0].snapshot.tick_current, 150);
        assert_eq!(store.get(&"1".into()), Some(RangeStatus::OutOfRange));
    }

    #[test]
    fn test_missing_positions_keep_their_entry() {
        let mut store = RangeStateStore::new();
        store.apply(
            &[position("1", -100, 100, 50), position("2", -100, 100, 500)],
            Utc::now(),
        );
        let transitions = store.apply(&[position("2", -100, 100, 0)], Utc::now());

        assert_eq!(transitions.len(), 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&"1".into()), Some(RangeStatus::InRange));
    }

    #[test]
    fn test_first_sight_is_order_independent() {
        let a = position("A", -100, 100, 0);
        let b = position("B", -100, 100, 200);

        let (forward, t1) = diff(&RangeStateStore::new(), &[a.clone(), b.clone()], Utc::now());
        let (backward, t2) = diff(&RangeStateStore::new(), &[b, a], Utc::now());

        assert!(t1.is_empty());
        assert!(t2.is_empty());
        assert_eq!(forward, backward);
        assert_eq!(forward.get(&"A".into()), Some(RangeStatus::InRange));
        assert_eq!(forward.get(&"B".into()), Some(RangeStatus::OutOfRange));
    }

    #[test]
    fn test_transitions_follow_snapshot_order() {
        let mut store = RangeStateStore::new();
        store.apply(
            &[position("1", 0, 10, 5), position("2", 0, 10, 5), position("3", 0, 10, 5)],
            Utc::now(),
        );
        let transitions = store.apply(
            &[position("3", 0, 10, 50), position("2", 0, 10, 5), position("1", 0, 10, 50)],
            Utc::now(),
        );

        let ids: Vec<_> = transitions.iter().map(|t| t.position_id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1"]);
    }

    #[test]
    fn test_diff_leaves_previous_untouched() {
        let mut previous = RangeStateStore::new();
        previous.apply(&[position("1", -100, 100, 50)], Utc::now());

        let (updated, transitions) = diff(&previous, &[position("1", -100, 100, 150)], Utc::now());

        assert_eq!(transitions.len(), 1);
        assert_eq!(previous.get(&"1".into()), Some(RangeStatus::InRange));
        assert_eq!(updated.get(&"1".into()), Some(RangeStatus::OutOfRange));
    }

    #[test]
    fn test_degenerate_range_is_out_of_range() {
        let mut store = RangeStateStore::new();
        store.apply(&[position("1", 100, -100, 0)], Utc::now());
        assert_eq!(store.get(&"1".into()), Some(RangeStatus::OutOfRange));
        assert_eq!(store.iter().count(), 1);
    }
}
