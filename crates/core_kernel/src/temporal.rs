//! Date axis and query-range types
//!
//! Every series derived from one ledger snapshot is plotted on a single
//! shared x-axis: the ascending set of distinct dates that carry at least
//! one income event anywhere in the ledger. Sharing the axis is what keeps
//! daily and cumulative panels comparable across grouping keys; gaps
//! between calendar dates are never invented.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid range: start {start} must not be after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
}

/// An inclusive date range used to scope a ledger query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range (inclusive)
    pub start: NaiveDate,
    /// Last day of the range (inclusive)
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new range, rejecting inverted bounds
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns true if the date falls within the range
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// The shared ascending axis of distinct event dates in one snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateAxis {
    dates: Vec<NaiveDate>,
}

impl DateAxis {
    /// Builds the axis from the dates present in a ledger
    ///
    /// Duplicates collapse and ordering is ascending regardless of the
    /// order events arrived in.
    pub fn from_dates<I>(dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let distinct: BTreeSet<NaiveDate> = dates.into_iter().collect();
        Self {
            dates: distinct.into_iter().collect(),
        }
    }

    /// Returns the axis dates in ascending order
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Number of distinct dates on the axis
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true when the ledger carried no dated events
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// First (earliest) date on the axis
    pub fn first(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    /// Last (latest) date on the axis
    pub fn last(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Position of a date on the axis, if present
    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        self.dates.binary_search(&date).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_axis_sorts_and_dedupes() {
        let axis = DateAxis::from_dates(vec![
            d(2024, 1, 3),
            d(2024, 1, 1),
            d(2024, 1, 3),
            d(2024, 1, 2),
        ]);

        assert_eq!(axis.dates(), &[d(2024, 1, 1), d(2024, 1, 2), d(2024, 1, 3)]);
        assert_eq!(axis.len(), 3);
        assert_eq!(axis.first(), Some(d(2024, 1, 1)));
        assert_eq!(axis.last(), Some(d(2024, 1, 3)));
    }

    #[test]
    fn test_empty_axis() {
        let axis = DateAxis::from_dates(vec![]);
        assert!(axis.is_empty());
        assert_eq!(axis.first(), None);
        assert_eq!(axis.last(), None);
    }

    #[test]
    fn test_axis_position() {
        let axis = DateAxis::from_dates(vec![d(2024, 1, 1), d(2024, 1, 5)]);
        assert_eq!(axis.position(d(2024, 1, 5)), Some(1));
        assert_eq!(axis.position(d(2024, 1, 3)), None);
    }

    #[test]
    fn test_range_rejects_inverted_bounds() {
        let result = DateRange::new(d(2024, 2, 1), d(2024, 1, 1));
        assert!(matches!(result, Err(TemporalError::InvalidRange { .. })));
    }

    #[test]
    fn test_range_contains_is_inclusive() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        assert!(range.contains(d(2024, 1, 1)));
        assert!(range.contains(d(2024, 1, 31)));
        assert!(!range.contains(d(2024, 2, 1)));
    }
}
