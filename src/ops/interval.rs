use std::fmt::{Debug, Formatter};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Eq, PartialEq, Deserialize, Serialize)]
#[must_use]
pub struct Interval {
    /// Inclusive.
    pub start: DateTime<Local>,

    /// Exclusive.
    pub end: DateTime<Local>,
}

impl Debug for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl Interval {
    pub const fn new(start: DateTime<Local>, end: DateTime<Local>) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn contains(self, other: DateTime<Local>) -> bool {
        (self.start <= other) && (other < self.end)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};

    use super::*;

    #[test]
    fn test_contains() {
        let start = Local.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let end = Local.with_ymd_and_hms(2025, 1, 1, 13, 0, 0).unwrap();
        let interval = Interval::new(start, end);

        assert!(interval.contains(start));
        assert!(interval.contains(start + TimeDelta::minutes(30)));
        assert!(!interval.contains(end));
    }
}
