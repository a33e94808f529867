//! Calculation logic for the timesheet engine.
//!
//! This module contains the statutory holiday calculator, the holiday
//! adjustment rules, the pay period resolver that derives pay, email and
//! reminder dates, and the period selector that maps a date to its
//! half-month pay period. Everything here is pure: results depend only on
//! the inputs.

mod adjustment;
mod holidays;
mod period_selector;
mod resolver;

pub use adjustment::{
    AdjustmentContext, HOLIDAY_RULES, HolidayImpact, HolidayRule, classify_impact, find_rule,
    pre_adjust, roll_back_weekend,
};
pub use holidays::{
    FIRST_GREGORIAN_YEAR, WeekdayOccurrence, WeekendRoll, easter_sunday, good_friday,
    holiday_on, holidays_for_year, is_business_day, is_weekend, nth_weekday, observed_holiday,
};
pub use period_selector::{
    PERIODS_PER_YEAR, current_period, last_day_of_month, next_period, periods_for_year,
    select_period,
};
pub use resolver::{EMAIL_HOUR, resolve, resolve_period};
