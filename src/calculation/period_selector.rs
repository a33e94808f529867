//! Period selection.
//!
//! Determines which half-month pay period a date falls in, and enumerates a
//! year's periods for schedule planning.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::EngineResult;
use crate::models::{PayPeriod, SECOND_HALF_START};

/// Number of pay periods in every year.
pub const PERIODS_PER_YEAR: usize = 24;

/// Returns the last day of `month` (1-12) in `year`.
///
/// Computed by stepping back one day from the first of the following month.
/// Returns `None` for a month outside 1-12.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::last_day_of_month;
///
/// assert_eq!(last_day_of_month(2024, 2), Some(29));
/// assert_eq!(last_day_of_month(2023, 2), Some(28));
/// ```
pub fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?
        .pred_opt()
        .map(|d| d.day())
}

/// Selects the pay period containing `today`.
///
/// Days 1-15 belong to the first half, days 16 onward to the second half.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::select_period;
/// use chrono::NaiveDate;
///
/// let period = select_period(NaiveDate::from_ymd_opt(2024, 2, 20).unwrap()).unwrap();
/// assert_eq!(period.start_day(), 16);
/// assert_eq!(period.end_day(), 29);
/// ```
pub fn select_period(today: NaiveDate) -> EngineResult<PayPeriod> {
    if today.day() < SECOND_HALF_START {
        PayPeriod::first_half(today.year(), today.month())
    } else {
        PayPeriod::second_half(today.year(), today.month())
    }
}

/// Selects the pay period containing the instant `now` as seen in `tz`.
pub fn current_period(now: DateTime<Utc>, tz: Tz) -> EngineResult<PayPeriod> {
    select_period(now.with_timezone(&tz).date_naive())
}

/// Returns the pay period that follows `period`.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::InvalidPeriod`] past the last
/// supported year.
pub fn next_period(period: &PayPeriod) -> EngineResult<PayPeriod> {
    if period.is_first_half() {
        PayPeriod::second_half(period.year(), period.month())
    } else if period.month() == 12 {
        PayPeriod::first_half(period.year() + 1, 1)
    } else {
        PayPeriod::first_half(period.year(), period.month() + 1)
    }
}

/// Lists the 24 pay periods of `year` in chronological order.
pub fn periods_for_year(year: i32) -> EngineResult<Vec<PayPeriod>> {
    let mut periods = Vec::with_capacity(PERIODS_PER_YEAR);
    for month in 1..=12 {
        periods.push(PayPeriod::first_half(year, month)?);
        periods.push(PayPeriod::second_half(year, month)?);
    }
    Ok(periods)
}
