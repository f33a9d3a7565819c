//! Fiscal period types
//!
//! Trial balance computation is always bounded by a fiscal period. Periods
//! are calendar months within a fiscal year; the containment check is the
//! single source of truth for which journal lines belong to a period.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised when constructing fiscal periods
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FiscalError {
    #[error("Invalid fiscal period {0}: must be between 1 and 12")]
    InvalidPeriod(u8),

    #[error("Invalid fiscal year {0}")]
    InvalidYear(i32),
}

/// A single reporting period within a fiscal year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FiscalPeriod {
    fiscal_year: i32,
    period: u8,
}

impl FiscalPeriod {
    /// Creates a fiscal period
    ///
    /// # Errors
    ///
    /// Returns `FiscalError::InvalidPeriod` when `period` is outside 1..=12
    pub fn new(fiscal_year: i32, period: u8) -> Result<Self, FiscalError> {
        if !(1..=12).contains(&period) {
            return Err(FiscalError::InvalidPeriod(period));
        }
        if !(1900..=9999).contains(&fiscal_year) {
            return Err(FiscalError::InvalidYear(fiscal_year));
        }
        Ok(Self {
            fiscal_year,
            period,
        })
    }

    /// Returns the period containing the given date
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            fiscal_year: date.year(),
            period: date.month() as u8,
        }
    }

    /// Returns the fiscal year
    pub fn fiscal_year(&self) -> i32 {
        self.fiscal_year
    }

    /// Returns the period number (1..=12)
    pub fn period(&self) -> u8 {
        self.period
    }

    /// Returns the first day of the period
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.fiscal_year, self.period as u32, 1)
            .expect("validated on construction")
    }

    /// Returns the last day of the period
    pub fn last_day(&self) -> NaiveDate {
        let (next_year, next_month) = if self.period == 12 {
            (self.fiscal_year + 1, 1)
        } else {
            (self.fiscal_year, self.period as u32 + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .expect("validated on construction")
            .pred_opt()
            .expect("month start has a predecessor")
    }

    /// Returns true if the date falls within this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day() && date <= self.last_day()
    }
}

impl fmt::Display for FiscalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-P{:02}", self.fiscal_year, self.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_bounds() {
        let period = FiscalPeriod::new(2024, 2).unwrap();
        assert_eq!(period.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(period.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_december_rolls_into_next_year() {
        let period = FiscalPeriod::new(2024, 12).unwrap();
        assert_eq!(period.last_day(), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn test_contains() {
        let period = FiscalPeriod::new(2024, 6).unwrap();
        assert!(period.contains(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()));
        assert!(!period.contains(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()));
        assert!(!period.contains(NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()));
    }

    #[test]
    fn test_invalid_period_rejected() {
        assert_eq!(
            FiscalPeriod::new(2024, 13),
            Err(FiscalError::InvalidPeriod(13))
        );
        assert_eq!(FiscalPeriod::new(2024, 0), Err(FiscalError::InvalidPeriod(0)));
    }

    #[test]
    fn test_containing_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let period = FiscalPeriod::containing(date);
        assert_eq!(period.fiscal_year(), 2025);
        assert_eq!(period.period(), 3);
        assert!(period.contains(date));
    }
}
