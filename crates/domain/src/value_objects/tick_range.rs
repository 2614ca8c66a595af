use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive tick bounds of a position's active price range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRange {
    pub lower: i32,
    pub upper: i32,
}

impl TickRange {
    pub fn new(lower: i32, upper: i32) -> Self {
        Self { lower, upper }
    }

    /// A range with `lower > upper` never contains anything.
    pub fn is_degenerate(&self) -> bool {
        self.lower > self.upper
    }

    pub fn contains(&self, tick: i32) -> bool {
        !self.is_degenerate() && tick >= self.lower && tick <= self.upper
    }
}

impl fmt::Display for TickRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.lower, self.upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let range = TickRange::new(-100, 100);
        assert!(range.contains(-100));
        assert!(range.contains(0));
        assert!(range.contains(100));
        assert!(!range.contains(-101));
        assert!(!range.contains(101));
    }

    #[test]
    fn test_single_tick_range() {
        let range = TickRange::new(7, 7);
        assert!(range.contains(7));
        assert!(!range.contains(8));
    }

    #[test]
    fn test_degenerate_range_contains_nothing() {
        let range = TickRange::new(100, -100);
        assert!(range.is_degenerate());
        assert!(!range.contains(0));
        assert!(!range.contains(100));
        assert!(!range.contains(-100));
    }
}
