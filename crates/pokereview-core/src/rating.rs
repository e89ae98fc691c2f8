//! # Ratings
//!
//! A pokemon's rating is the arithmetic mean of the `rating` of every review
//! that references it.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  reviews        │  rating                                              │
//! │  ───────────────┼────────────────────────────────────────────────────  │
//! │  (none)         │  0            ← not an error, not null              │
//! │  [3, 5]         │  4                                                   │
//! │  [4, 5]         │  4.5          ← decimal division, never integer     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sum and count of review ratings for one pokemon.
///
/// The database layer fills this from a single `SUM`/`COUNT` aggregate so the
/// division happens here, in exact decimal arithmetic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct RatingSummary {
    /// Sum of all ratings.
    pub total: i64,
    /// Number of reviews.
    pub count: i64,
}

impl RatingSummary {
    /// Builds a summary from individual ratings.
    pub fn from_ratings<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        ratings
            .into_iter()
            .fold(RatingSummary::default(), |acc, rating| RatingSummary {
                total: acc.total + i64::from(rating),
                count: acc.count + 1,
            })
    }

    /// Returns true when no review contributed to this summary.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count <= 0
    }

    /// Mean rating, or zero when there are no reviews.
    pub fn mean(&self) -> Decimal {
        if self.is_empty() {
            return Decimal::ZERO;
        }

        Decimal::from(self.total) / Decimal::from(self.count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_no_reviews_is_zero() {
        let summary = RatingSummary::from_ratings(Vec::new());
        assert!(summary.is_empty());
        assert_eq!(summary.mean(), Decimal::ZERO);
    }

    #[test]
    fn test_mean_of_whole_ratings() {
        let summary = RatingSummary::from_ratings([3, 5]);
        assert_eq!(summary, RatingSummary { total: 8, count: 2 });
        assert_eq!(summary.mean(), dec!(4));
    }

    #[test]
    fn test_mean_keeps_fraction() {
        assert_eq!(RatingSummary::from_ratings([4, 5]).mean(), dec!(4.5));
        assert_eq!(RatingSummary::from_ratings([1, 2, 2, 2]).mean(), dec!(1.75));
    }

    #[test]
    fn test_single_review() {
        assert_eq!(RatingSummary::from_ratings([2]).mean(), dec!(2));
    }
}
