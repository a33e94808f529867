//! Holiday adjustment rules.
//!
//! A handful of statutory holidays can land on, or just before, a pay day.
//! Each is described by a [`HolidayRule`] keyed on the month and start day of
//! the period it can affect. At most one rule matches a period; the matched
//! rule either pulls the pay day back or marks the email or reminder day as
//! needing an extra business day, which the resolver consults afterwards.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{FIRST_HALF_START, PayPeriod, SECOND_HALF_START, StatutoryHoliday};

use super::holidays::is_weekend;

/// How a holiday relates to a period's pay day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayImpact {
    /// The holiday is not near the pay day.
    Unaffected,
    /// The holiday is the pay day itself.
    PayDay,
    /// The holiday is one of the two business days before the pay day.
    EmailWindow,
    /// The holiday is the third business day before the pay day.
    ReminderDay,
}

/// Working state threaded through the holiday rule and the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjustmentContext {
    /// The period being resolved.
    pub period: PayPeriod,
    /// Candidate pay day; starts at the period's last day.
    pub pay_date: NaiveDate,
    /// The email must move back one extra business day.
    pub email_day_affected: bool,
    /// The reminder must move back one extra business day.
    pub reminder_day_affected: bool,
    /// The holiday whose rule matched the period, if any.
    pub holiday: Option<StatutoryHoliday>,
    /// What the matched rule decided.
    pub impact: HolidayImpact,
}

impl AdjustmentContext {
    /// Starts an unadjusted context for `period`.
    pub fn new(period: PayPeriod) -> Self {
        Self {
            period,
            pay_date: period.end_date(),
            email_day_affected: false,
            reminder_day_affected: false,
            holiday: None,
            impact: HolidayImpact::Unaffected,
        }
    }
}

/// A holiday that can disturb the pay dates of one specific period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HolidayRule {
    /// The holiday being checked.
    pub holiday: StatutoryHoliday,
    /// Month (1-12) of the period the holiday can affect.
    pub month: u32,
    /// Start day of the period the holiday can affect.
    pub start_day: u32,
}

/// The holiday rules, one per period a holiday can reach.
///
/// Good Friday moves between March 20 and April 23, so it has a rule for
/// both the second half of March and the first half of April.
pub const HOLIDAY_RULES: [HolidayRule; 5] = [
    HolidayRule {
        holiday: StatutoryHoliday::FamilyDay,
        month: 2,
        start_day: FIRST_HALF_START,
    },
    HolidayRule {
        holiday: StatutoryHoliday::GoodFriday,
        month: 3,
        start_day: SECOND_HALF_START,
    },
    HolidayRule {
        holiday: StatutoryHoliday::GoodFriday,
        month: 4,
        start_day: FIRST_HALF_START,
    },
    HolidayRule {
        holiday: StatutoryHoliday::Thanksgiving,
        month: 10,
        start_day: FIRST_HALF_START,
    },
    HolidayRule {
        holiday: StatutoryHoliday::RemembranceDay,
        month: 11,
        start_day: FIRST_HALF_START,
    },
];

impl HolidayRule {
    /// Returns true when this rule governs `period`.
    pub fn applies(&self, period: &PayPeriod) -> bool {
        period.month() == self.month && period.start_day() == self.start_day
    }

    /// Applies the rule to `ctx`.
    ///
    /// A holiday on the pay day moves the pay day to the day before the
    /// holiday (the weekend roll-back runs afterwards). A holiday in the
    /// email or reminder window only sets the corresponding flag.
    pub fn adjust(&self, mut ctx: AdjustmentContext) -> AdjustmentContext {
        ctx.holiday = Some(self.holiday);

        let Some(observed) = self.holiday.observed_date(ctx.period.year()) else {
            return ctx;
        };

        ctx.impact = classify_impact(observed, roll_back_weekend(ctx.pay_date));
        match ctx.impact {
            HolidayImpact::PayDay => ctx.pay_date = observed - Days::new(1),
            HolidayImpact::EmailWindow => ctx.email_day_affected = true,
            HolidayImpact::ReminderDay => ctx.reminder_day_affected = true,
            HolidayImpact::Unaffected => {}
        }

        debug!(
            period = %ctx.period,
            holiday = %self.holiday,
            observed = %observed,
            impact = ?ctx.impact,
            "Holiday rule applied"
        );

        ctx
    }
}

/// Finds the rule governing `period`, if any.
pub fn find_rule(period: &PayPeriod) -> Option<&'static HolidayRule> {
    HOLIDAY_RULES.iter().find(|rule| rule.applies(period))
}

/// Runs the holiday pre-adjustment for `period`.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::{pre_adjust, HolidayImpact};
/// use timesheet_engine::models::{PayPeriod, StatutoryHoliday};
///
/// // Thanksgiving 2024 is Monday the 14th, the day before Tuesday's pay day.
/// let period = PayPeriod::first_half(2024, 10).unwrap();
/// let ctx = pre_adjust(period);
/// assert_eq!(ctx.holiday, Some(StatutoryHoliday::Thanksgiving));
/// assert_eq!(ctx.impact, HolidayImpact::EmailWindow);
/// assert!(ctx.email_day_affected);
/// ```
pub fn pre_adjust(period: PayPeriod) -> AdjustmentContext {
    let ctx = AdjustmentContext::new(period);
    match find_rule(&period) {
        Some(rule) => rule.adjust(ctx),
        None => ctx,
    }
}

/// Classifies `holiday` against a weekday `pay_date`.
///
/// Business days are counted with weekday arithmetic: within one week the
/// distance is the day count, across a weekend it is two less.
pub fn classify_impact(holiday: NaiveDate, pay_date: NaiveDate) -> HolidayImpact {
    if holiday > pay_date || is_weekend(holiday) {
        return HolidayImpact::Unaffected;
    }

    let days = (pay_date - holiday).num_days();
    if days == 0 {
        return HolidayImpact::PayDay;
    }
    if days >= 7 {
        return HolidayImpact::Unaffected;
    }

    let business_days = if pay_date.weekday().num_days_from_monday()
        > holiday.weekday().num_days_from_monday()
    {
        days
    } else {
        days - 2
    };

    match business_days {
        1 | 2 => HolidayImpact::EmailWindow,
        3 => HolidayImpact::ReminderDay,
        _ => HolidayImpact::Unaffected,
    }
}

/// Moves a Saturday back one day and a Sunday back two days.
pub fn roll_back_weekend(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date - Days::new(1),
        Weekday::Sun => date - Days::new(2),
        _ => date,
    }
}
