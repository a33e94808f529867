//! Resolver output model.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The dates derived for one pay period.
///
/// Produced by [`crate::calculation::resolve`] and never mutated afterwards;
/// the fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodDates {
    label: String,
    pay_date: NaiveDate,
    email_date: NaiveDateTime,
    reminder_date: NaiveDate,
}

impl PeriodDates {
    pub(crate) fn new(
        label: String,
        pay_date: NaiveDate,
        email_date: NaiveDateTime,
        reminder_date: NaiveDate,
    ) -> Self {
        Self {
            label,
            pay_date,
            email_date,
            reminder_date,
        }
    }

    /// "MM/DD/YYYY - MM/DD/YYYY" label of the period.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The business day on which pay is issued.
    pub fn pay_date(&self) -> NaiveDate {
        self.pay_date
    }

    /// When the timesheet is emailed, in local wall-clock time.
    pub fn email_date(&self) -> NaiveDateTime {
        self.email_date
    }

    /// The business day on which the employee is reminded to finish the timesheet.
    pub fn reminder_date(&self) -> NaiveDate {
        self.reminder_date
    }

    /// Localizes the email instant to `tz`.
    ///
    /// An ambiguous local time (DST fall-back) resolves to the earlier instant.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SchedulingError`] when the wall-clock time does
    /// not exist in `tz` (DST spring-forward gap).
    pub fn email_at(&self, tz: Tz) -> EngineResult<DateTime<Tz>> {
        tz.from_local_datetime(&self.email_date)
            .earliest()
            .ok_or_else(|| EngineError::SchedulingError {
                message: format!("{} does not exist in {}", self.email_date, tz),
            })
    }
}
