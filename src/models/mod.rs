//! Core data models for the timesheet engine.
//!
//! All models are value types: pay periods, holiday records and the dates
//! resolved for a period.

mod holiday;
mod pay_period;
mod period_dates;

pub use holiday::{HOLIDAY_TABLE_VERSION, HolidayRecord, StatutoryHoliday};
pub use pay_period::{FIRST_HALF_START, MAX_YEAR, MIN_YEAR, PayPeriod, SECOND_HALF_START};
pub use period_dates::PeriodDates;
