//! Unit tests for fiscal periods
//!
//! Tests cover period construction, boundary dates, containment, and
//! display formatting.

use chrono::NaiveDate;
use core_kernel::fiscal::{FiscalError, FiscalPeriod};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

mod construction {
    use super::*;

    #[test]
    fn test_new_accepts_valid_period() {
        let period = FiscalPeriod::new(2024, 3).unwrap();
        assert_eq!(period.fiscal_year(), 2024);
        assert_eq!(period.period(), 3);
    }

    #[test]
    fn test_period_out_of_range_rejected() {
        assert_eq!(FiscalPeriod::new(2024, 0), Err(FiscalError::InvalidPeriod(0)));
        assert_eq!(
            FiscalPeriod::new(2024, 13),
            Err(FiscalError::InvalidPeriod(13))
        );
    }

    #[test]
    fn test_year_out_of_range_rejected() {
        assert_eq!(FiscalPeriod::new(1899, 1), Err(FiscalError::InvalidYear(1899)));
        assert_eq!(
            FiscalPeriod::new(10_000, 1),
            Err(FiscalError::InvalidYear(10_000))
        );
    }

    #[test]
    fn test_containing_maps_date_to_calendar_month() {
        let period = FiscalPeriod::containing(date(2025, 11, 30));
        assert_eq!(period, FiscalPeriod::new(2025, 11).unwrap());
    }
}

mod boundaries {
    use super::*;

    #[test]
    fn test_first_and_last_day() {
        let period = FiscalPeriod::new(2024, 4).unwrap();
        assert_eq!(period.first_day(), date(2024, 4, 1));
        assert_eq!(period.last_day(), date(2024, 4, 30));
    }

    #[test]
    fn test_february_leap_year() {
        let period = FiscalPeriod::new(2024, 2).unwrap();
        assert_eq!(period.last_day(), date(2024, 2, 29));
    }

    #[test]
    fn test_february_non_leap_year() {
        let period = FiscalPeriod::new(2023, 2).unwrap();
        assert_eq!(period.last_day(), date(2023, 2, 28));
    }

    #[test]
    fn test_december_does_not_spill_into_next_year() {
        let period = FiscalPeriod::new(2024, 12).unwrap();
        assert_eq!(period.last_day(), date(2024, 12, 31));
    }
}

mod containment {
    use super::*;

    #[test]
    fn test_contains_is_inclusive_of_both_ends() {
        let period = FiscalPeriod::new(2024, 6).unwrap();
        assert!(period.contains(date(2024, 6, 1)));
        assert!(period.contains(date(2024, 6, 30)));
    }

    #[test]
    fn test_adjacent_days_excluded() {
        let period = FiscalPeriod::new(2024, 6).unwrap();
        assert!(!period.contains(date(2024, 5, 31)));
        assert!(!period.contains(date(2024, 7, 1)));
    }

    #[test]
    fn test_same_month_other_year_excluded() {
        let period = FiscalPeriod::new(2024, 6).unwrap();
        assert!(!period.contains(date(2023, 6, 15)));
    }
}

mod formatting {
    use super::*;

    #[test]
    fn test_display_pads_period_number() {
        let period = FiscalPeriod::new(2024, 3).unwrap();
        assert_eq!(period.to_string(), "2024-P03");
    }

    #[test]
    fn test_serde_roundtrip() {
        let period = FiscalPeriod::new(2024, 9).unwrap();
        let json = serde_json::to_string(&period).unwrap();
        let back: FiscalPeriod = serde_json::from_str(&json).unwrap();
        assert_eq!(period, back);
    }
}
