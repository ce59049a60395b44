use std::fmt::{Debug, Display, Formatter};

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Monetary value per kilowatt-hour, in the grid operator's currency.
///
/// Backed by [`OrderedFloat`] so that prices are totally ordered and can be used
/// as sorting and `min`/`max` keys directly.
#[derive(
    Clone,
    Copy,
    Default,
    Deserialize,
    Eq,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::From,
    derive_more::FromStr,
    derive_more::Neg,
    derive_more::Sub,
    derive_more::SubAssign,
    derive_more::Sum,
)]
pub struct Cost(pub OrderedFloat<f64>);

impl Cost {
    pub const ZERO: Self = Self(OrderedFloat(0.0));

    /// Round the cost to [mills][1], the granularity of published day-ahead prices.
    ///
    /// [1]: https://en.wikipedia.org/wiki/Mill_(currency)
    #[must_use]
    pub fn round_to_mills(self) -> Self {
        Self(OrderedFloat((self.0.into_inner() * 1000.0).round() / 1000.0))
    }

    #[must_use]
    pub fn into_inner(self) -> f64 {
        self.0.into_inner()
    }
}

impl From<f64> for Cost {
    fn from(value: f64) -> Self {
        Self(OrderedFloat(value))
    }
}

impl Display for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl Debug for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_round_to_mills() {
        assert_abs_diff_eq!(Cost::from(0.0015).round_to_mills().into_inner(), 0.002);
        assert_abs_diff_eq!(Cost::from(-0.0015).round_to_mills().into_inner(), -0.002);
    }

    #[test]
    fn test_ordering() {
        assert!(Cost::from(0.1) < Cost::from(0.2));
        assert!(Cost::from(-1.0) < Cost::ZERO);
    }
}
