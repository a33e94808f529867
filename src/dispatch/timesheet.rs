//! The timesheet grid handed to the renderer.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::calculation::{holiday_on, is_weekend, resolve_period};
use crate::config::EmployeeProfile;
use crate::models::PayPeriod;

/// One calendar day of a timesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimesheetRow {
    /// The day.
    pub date: NaiveDate,
    /// Its day of the week.
    pub weekday: Weekday,
    /// Saturday or Sunday.
    pub is_weekend: bool,
    /// Observed statutory holiday on this day, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holiday: Option<String>,
}

/// A timesheet for one employee and one pay period.
///
/// Formatting and locale are left to the renderer; this is only the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timesheet {
    /// Employee name printed in the header.
    pub employee: String,
    /// Period label, "MM/DD/YYYY - MM/DD/YYYY".
    pub label: String,
    /// Pay date of the period.
    pub pay_date: NaiveDate,
    /// One row per calendar day of the period.
    pub rows: Vec<TimesheetRow>,
}

impl Timesheet {
    /// Builds the grid for `period`.
    ///
    /// # Example
    ///
    /// ```
    /// use timesheet_engine::config::EmployeeProfile;
    /// use timesheet_engine::dispatch::Timesheet;
    /// use timesheet_engine::models::PayPeriod;
    ///
    /// let employee = EmployeeProfile {
    ///     name: "Sam Rivera".to_string(),
    ///     email: "sam@example.com".to_string(),
    ///     recipients: vec!["payroll@example.com".to_string()],
    /// };
    /// let sheet = Timesheet::build(&PayPeriod::first_half(2024, 10).unwrap(), &employee);
    /// assert_eq!(sheet.rows.len(), 15);
    /// assert_eq!(sheet.rows[13].holiday.as_deref(), Some("Thanksgiving"));
    /// ```
    pub fn build(period: &PayPeriod, employee: &EmployeeProfile) -> Self {
        let rows = period
            .start_date()
            .iter_days()
            .take_while(|date| *date <= period.end_date())
            .map(|date| TimesheetRow {
                date,
                weekday: date.weekday(),
                is_weekend: is_weekend(date),
                holiday: holiday_on(date).map(|h| h.name().to_string()),
            })
            .collect();

        Self {
            employee: employee.name.clone(),
            label: period.label(),
            pay_date: resolve_period(period).pay_date(),
            rows,
        }
    }

    /// Number of weekdays that are not statutory holidays.
    pub fn working_days(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| !row.is_weekend && row.holiday.is_none())
            .count()
    }
}
