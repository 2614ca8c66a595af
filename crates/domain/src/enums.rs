use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a position relative to its pool's current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeStatus {
    /// `tick_lower <= tick_current <= tick_upper`.
    InRange,
    /// The current tick lies outside the position's range.
    OutOfRange,
}

impl RangeStatus {
    /// Returns true for [`RangeStatus::InRange`].
    #[must_use]
    pub fn is_in_range(self) -> bool {
        matches!(self, Self::InRange)
    }

    /// Marker used in status lines.
    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            Self::InRange => "🟢",
            Self::OutOfRange => "🔴",
        }
    }
}

impl From<bool> for RangeStatus {
    fn from(in_range: bool) -> Self {
        if in_range {
            Self::InRange
        } else {
            Self::OutOfRange
        }
    }
}

impl fmt::Display for RangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InRange => write!(f, "IN RANGE"),
            Self::OutOfRange => write!(f, "OUT OF RANGE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bool() {
        assert_eq!(RangeStatus::from(true), RangeStatus::InRange);
        assert_eq!(RangeStatus::from(false), RangeStatus::OutOfRange);
        assert!(RangeStatus::InRange.is_in_range());
        assert!(!RangeStatus::OutOfRange.is_in_range());
    }

    #[test]
    fn test_display() {
        assert_eq!(RangeStatus::InRange.to_string(), "IN RANGE");
        assert_eq!(RangeStatus::OutOfRange.to_string(), "OUT OF RANGE");
    }
}
