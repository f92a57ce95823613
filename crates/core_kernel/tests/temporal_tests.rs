//! Comprehensive tests for DateRange and DateAxis

use chrono::NaiveDate;
use proptest::prelude::*;

use core_kernel::{DateAxis, DateRange};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ============================================================================
// DateRange Tests
// ============================================================================

mod range_tests {
    use super::*;

    #[test]
    fn test_single_day_range() {
        let range = DateRange::new(d(2024, 1, 15), d(2024, 1, 15)).unwrap();
        assert!(range.contains(d(2024, 1, 15)));
        assert!(!range.contains(d(2024, 1, 14)));
        assert!(!range.contains(d(2024, 1, 16)));
    }

    #[test]
    fn test_range_spans_year_boundary() {
        let range = DateRange::new(d(2023, 12, 20), d(2024, 1, 10)).unwrap();
        assert!(range.contains(d(2023, 12, 31)));
        assert!(range.contains(d(2024, 1, 1)));
    }
}

// ============================================================================
// DateAxis Tests
// ============================================================================

mod axis_tests {
    use super::*;

    #[test]
    fn test_axis_never_invents_gap_days() {
        let axis = DateAxis::from_dates(vec![d(2024, 1, 1), d(2024, 1, 20)]);
        assert_eq!(axis.len(), 2);
    }

    #[test]
    fn test_positions_cover_whole_axis() {
        let dates = vec![d(2024, 3, 1), d(2024, 3, 4), d(2024, 3, 9)];
        let axis = DateAxis::from_dates(dates.clone());

        for (expected, date) in dates.into_iter().enumerate() {
            assert_eq!(axis.position(date), Some(expected));
        }
    }

    #[test]
    fn test_axis_serde_round_trip() {
        let axis = DateAxis::from_dates(vec![d(2024, 1, 2), d(2024, 1, 1)]);
        let json = serde_json::to_string(&axis).unwrap();
        let back: DateAxis = serde_json::from_str(&json).unwrap();
        assert_eq!(axis, back);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2020i32..2030, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, day)| NaiveDate::from_ymd_opt(y, m, day).expect("valid date"))
}

proptest! {
    #[test]
    fn axis_is_sorted_and_distinct(dates in proptest::collection::vec(date_strategy(), 0..50)) {
        let axis = DateAxis::from_dates(dates);
        for pair in axis.dates().windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn every_input_date_is_on_the_axis(dates in proptest::collection::vec(date_strategy(), 0..50)) {
        let axis = DateAxis::from_dates(dates.clone());
        for date in dates {
            prop_assert!(axis.position(date).is_some());
        }
    }
}
