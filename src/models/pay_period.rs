//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type: a half-month window that
//! either runs from the 1st to the 15th or from the 16th to the last day of
//! the month.

use chrono::NaiveDate;
use serde::Serialize;

use crate::calculation::{FIRST_GREGORIAN_YEAR, last_day_of_month};
use crate::error::{EngineError, EngineResult};

/// Day on which the first half of every month starts.
pub const FIRST_HALF_START: u32 = 1;

/// Day on which the second half of every month starts.
pub const SECOND_HALF_START: u32 = 16;

/// Earliest supported year (first Gregorian Easter).
pub const MIN_YEAR: i32 = FIRST_GREGORIAN_YEAR;

/// Latest supported year.
pub const MAX_YEAR: i32 = 9999;

/// Represents a half-month pay period.
///
/// Fields are private so that every `PayPeriod` in circulation has passed
/// the bounds check in [`PayPeriod::new`]. Months are 1-based.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::second_half(2024, 2).unwrap();
/// assert_eq!(period.end_day(), 29);
/// assert_eq!(period.label(), "02/16/2024 - 02/29/2024");
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2024, 2, 20).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PayPeriod {
    year: i32,
    month: u32,
    start_day: u32,
    end_day: u32,
    #[serde(skip)]
    start_date: NaiveDate,
    #[serde(skip)]
    end_date: NaiveDate,
}

impl PayPeriod {
    /// Creates a pay period after validating its bounds.
    ///
    /// `start_day` must be 1 or 16. `end_day` must be the last day of the
    /// month, or 15 when the period starts on the 1st. The whole-month window
    /// (1 through the last day) is therefore accepted.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPeriod`] when the year is outside
    /// [`MIN_YEAR`]..=[`MAX_YEAR`], the month is outside 1-12, or either day
    /// falls outside the bounds above.
    pub fn new(year: i32, month: u32, start_day: u32, end_day: u32) -> EngineResult<Self> {
        let invalid = |message: String| {
            EngineError::invalid_period(year, month, start_day, end_day, message)
        };

        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(invalid(format!(
                "year must be between {} and {}",
                MIN_YEAR, MAX_YEAR
            )));
        }

        let last_day = last_day_of_month(year, month)
            .ok_or_else(|| invalid("month must be between 1 and 12".to_string()))?;

        if start_day != FIRST_HALF_START && start_day != SECOND_HALF_START {
            return Err(invalid(format!(
                "start day must be {} or {}",
                FIRST_HALF_START, SECOND_HALF_START
            )));
        }
        if end_day > last_day {
            return Err(invalid(format!(
                "end day past end of month (last day is {})",
                last_day
            )));
        }
        let first_half_end = start_day == FIRST_HALF_START && end_day == SECOND_HALF_START - 1;
        if end_day != last_day && !first_half_end {
            return Err(invalid(format!(
                "end day must be {} or the last day of the month ({})",
                SECOND_HALF_START - 1,
                last_day
            )));
        }

        let start_date = NaiveDate::from_ymd_opt(year, month, start_day)
            .ok_or_else(|| invalid("start day is not a calendar date".to_string()))?;
        let end_date = NaiveDate::from_ymd_opt(year, month, end_day)
            .ok_or_else(|| invalid("end day is not a calendar date".to_string()))?;

        Ok(Self {
            year,
            month,
            start_day,
            end_day,
            start_date,
            end_date,
        })
    }

    /// The 1st-15th period of the given month.
    pub fn first_half(year: i32, month: u32) -> EngineResult<Self> {
        Self::new(year, month, FIRST_HALF_START, SECOND_HALF_START - 1)
    }

    /// The 16th-end of month period of the given month.
    pub fn second_half(year: i32, month: u32) -> EngineResult<Self> {
        // An unknown month yields 0 here and is reported by `new`.
        let last_day = last_day_of_month(year, month).unwrap_or(0);
        Self::new(year, month, SECOND_HALF_START, last_day)
    }

    /// The period's year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The period's month (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The first day of the period.
    pub fn start_day(&self) -> u32 {
        self.start_day
    }

    /// The last day of the period.
    pub fn end_day(&self) -> u32 {
        self.end_day
    }

    /// Returns true for periods starting on the 1st.
    pub fn is_first_half(&self) -> bool {
        self.start_day == FIRST_HALF_START
    }

    /// The first date of the period.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// The last date of the period.
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Checks if a given date falls within this pay period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// The canonical "MM/DD/YYYY - MM/DD/YYYY" label.
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.start_date.format("%m/%d/%Y"),
            self.end_date.format("%m/%d/%Y")
        )
    }
}

impl std::fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_first_half_is_first_to_fifteenth() {
        let period = PayPeriod::first_half(2024, 10).unwrap();
        assert_eq!(period.start_date(), date(2024, 10, 1));
        assert_eq!(period.end_date(), date(2024, 10, 15));
        assert!(period.is_first_half());
    }

    #[test]
    fn test_second_half_ends_on_last_day() {
        assert_eq!(PayPeriod::second_half(2023, 2).unwrap().end_day(), 28);
        assert_eq!(PayPeriod::second_half(2024, 2).unwrap().end_day(), 29);
        assert_eq!(PayPeriod::second_half(2024, 4).unwrap().end_day(), 30);
        assert_eq!(PayPeriod::second_half(2024, 12).unwrap().end_day(), 31);
    }

    #[test]
    fn test_label_format() {
        let period = PayPeriod::first_half(2025, 4).unwrap();
        assert_eq!(period.label(), "04/01/2025 - 04/15/2025");
        assert_eq!(period.to_string(), period.label());
    }

    #[test]
    fn test_whole_month_window_is_accepted() {
        let period = PayPeriod::new(2024, 10, 1, 31).unwrap();
        assert_eq!(period.label(), "10/01/2024 - 10/31/2024");
    }

    #[test]
    fn test_non_boundary_end_day_is_rejected() {
        for (start_day, end_day) in [(1, 1), (1, 14), (1, 20), (16, 15), (16, 16), (16, 30)] {
            match PayPeriod::new(2023, 10, start_day, end_day) {
                Err(EngineError::InvalidPeriod { end_day: rejected, .. }) => {
                    assert_eq!(rejected, end_day)
                }
                other => panic!(
                    "Expected InvalidPeriod for {}..={}, got {:?}",
                    start_day, end_day, other
                ),
            }
        }
    }

    #[test]
    fn test_start_day_must_be_period_boundary() {
        let result = PayPeriod::new(2024, 10, 2, 15);
        match result {
            Err(EngineError::InvalidPeriod { start_day, .. }) => assert_eq!(start_day, 2),
            other => panic!("Expected InvalidPeriod, got {:?}", other),
        }
    }

    #[test]
    fn test_end_day_past_month_end_is_rejected() {
        assert!(matches!(
            PayPeriod::new(2023, 2, 16, 29),
            Err(EngineError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_end_day_before_start_is_rejected() {
        assert!(matches!(
            PayPeriod::new(2024, 3, 16, 15),
            Err(EngineError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_month_out_of_range_is_rejected() {
        assert!(PayPeriod::new(2024, 0, 1, 15).is_err());
        assert!(PayPeriod::new(2024, 13, 1, 15).is_err());
    }

    #[test]
    fn test_year_out_of_range_is_rejected() {
        assert!(PayPeriod::new(1582, 10, 1, 15).is_err());
        assert!(PayPeriod::new(10_000, 1, 1, 15).is_err());
        assert!(PayPeriod::new(MIN_YEAR, 1, 1, 15).is_ok());
        assert!(crate::calculation::easter_sunday(MIN_YEAR).is_some());
        assert!(crate::calculation::easter_sunday(MIN_YEAR - 1).is_none());
        assert!(PayPeriod::second_half(MIN_YEAR, 3).is_ok());
    }

    #[test]
    fn test_contains_date_is_inclusive() {
        let period = PayPeriod::second_half(2024, 6).unwrap();
        assert!(period.contains_date(date(2024, 6, 16)));
        assert!(period.contains_date(date(2024, 6, 30)));
        assert!(!period.contains_date(date(2024, 6, 15)));
        assert!(!period.contains_date(date(2024, 7, 1)));
    }

    #[test]
    fn test_serialize_pay_period() {
        let period = PayPeriod::first_half(2026, 1).unwrap();
        let json = serde_json::to_string(&period).unwrap();
        assert_eq!(
            json,
            r#"{"year":2026,"month":1,"start_day":1,"end_day":15}"#
        );
    }
}
