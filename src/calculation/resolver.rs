//! Pay period resolution.
//!
//! Turns a pay period into its label, pay date, email date and reminder
//! date. Business-day back-offs are fixed day counts derived from the pay
//! day's weekday, not an iterative weekend skip.

use chrono::{Datelike, Days, NaiveDate, NaiveTime, TimeDelta, Weekday};
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{PayPeriod, PeriodDates};

use super::adjustment::{AdjustmentContext, pre_adjust, roll_back_weekend};

/// Local hour at which the timesheet email goes out.
pub const EMAIL_HOUR: u32 = 10;

// Weekday indices counted from Sunday = 0.
const SUNDAY: i64 = 0;
const TUESDAY: i64 = 2;

/// Resolves the dates of the pay period `start_day..=end_day` of `month`.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::InvalidPeriod`] when the inputs do
/// not describe a valid period (see [`PayPeriod::new`]).
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::resolve;
/// use chrono::NaiveDate;
///
/// let dates = resolve(2024, 10, 1, 15).unwrap();
/// assert_eq!(dates.label(), "10/01/2024 - 10/15/2024");
/// assert_eq!(dates.pay_date(), NaiveDate::from_ymd_opt(2024, 10, 15).unwrap());
/// // Thanksgiving on Monday the 14th pushes the email back to Thursday.
/// assert_eq!(dates.email_date().date(), NaiveDate::from_ymd_opt(2024, 10, 10).unwrap());
/// assert_eq!(dates.reminder_date(), NaiveDate::from_ymd_opt(2024, 10, 9).unwrap());
/// ```
pub fn resolve(year: i32, month: u32, start_day: u32, end_day: u32) -> EngineResult<PeriodDates> {
    let period = PayPeriod::new(year, month, start_day, end_day)?;
    Ok(resolve_period(&period))
}

/// Resolves the dates of an already validated period.
pub fn resolve_period(period: &PayPeriod) -> PeriodDates {
    let ctx = pre_adjust(*period);

    let pay_date = roll_back_weekend(ctx.pay_date);
    let pay_weekday = sunday_index(pay_date);

    let email_day = pay_date - Days::new(email_back_off(pay_weekday, &ctx));
    let reminder_date = if ctx.email_day_affected {
        email_day - Days::new(previous_business_day_offset(email_day))
    } else {
        email_day - Days::new(reminder_back_off(pay_weekday, &ctx))
    };

    let email_date = email_day.and_time(NaiveTime::MIN) + TimeDelta::hours(i64::from(EMAIL_HOUR));

    debug!(
        period = %period,
        pay_date = %pay_date,
        email_date = %email_date,
        reminder_date = %reminder_date,
        "Resolved pay period"
    );

    PeriodDates::new(period.label(), pay_date, email_date, reminder_date)
}

/// Days from the pay day back to the email day (two business days).
fn email_back_off(pay_weekday: i64, ctx: &AdjustmentContext) -> u64 {
    let mut back = 0;
    if ctx.email_day_affected {
        back += if pay_weekday - 2 >= TUESDAY { 1 } else { 3 };
    } else if pay_weekday - 2 <= SUNDAY {
        back += 2;
    }
    back + 2
}

/// Days from the email day back to the reminder day (one business day).
fn reminder_back_off(pay_weekday: i64, ctx: &AdjustmentContext) -> u64 {
    let mut back = 0;
    if ctx.reminder_day_affected {
        back += if pay_weekday - 3 >= TUESDAY { 1 } else { 3 };
    } else if pay_weekday - 3 == SUNDAY {
        back += 2;
    }
    back + 1
}

fn previous_business_day_offset(date: NaiveDate) -> u64 {
    if date.weekday() == Weekday::Mon { 3 } else { 1 }
}

fn sunday_index(date: NaiveDate) -> i64 {
    i64::from(date.weekday().num_days_from_sunday())
}
