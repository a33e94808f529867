//! Configuration types for the timesheet engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono_tz::Tz;
use serde::Deserialize;

use crate::dispatch::RetryPolicy;

/// Scheduling settings from `schedule.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleSettings {
    /// IANA timezone in which period boundaries and trigger times are read
    /// (e.g., "America/Vancouver").
    pub timezone: String,
    /// Local hour at which the period-start trigger fires.
    pub period_start_hour: u32,
    /// Local hour at which the reminder trigger fires.
    pub reminder_hour: u32,
}

/// The employee whose timesheet is being produced, from `employee.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeProfile {
    /// Name printed on the timesheet.
    pub name: String,
    /// Address that receives reminders.
    pub email: String,
    /// Addresses that receive the submitted timesheet.
    pub recipients: Vec<String>,
}

/// Dispatch settings from `dispatch.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchSettings {
    /// Retry policy for PDF export and email.
    pub retry: RetryPolicy,
    /// Prefix of every outgoing subject line.
    #[serde(default = "default_subject_prefix")]
    pub subject_prefix: String,
}

fn default_subject_prefix() -> String {
    "Timesheet".to_string()
}

/// The complete configuration loaded from a configuration directory.
#[derive(Debug, Clone)]
pub struct TimesheetConfig {
    schedule: ScheduleSettings,
    employee: EmployeeProfile,
    dispatch: DispatchSettings,
    timezone: Tz,
}

impl TimesheetConfig {
    /// Creates a TimesheetConfig from its parsed parts.
    pub fn new(
        schedule: ScheduleSettings,
        employee: EmployeeProfile,
        dispatch: DispatchSettings,
        timezone: Tz,
    ) -> Self {
        Self {
            schedule,
            employee,
            dispatch,
            timezone,
        }
    }

    /// Returns the scheduling settings.
    pub fn schedule(&self) -> &ScheduleSettings {
        &self.schedule
    }

    /// Returns the employee profile.
    pub fn employee(&self) -> &EmployeeProfile {
        &self.employee
    }

    /// Returns the dispatch settings.
    pub fn dispatch(&self) -> &DispatchSettings {
        &self.dispatch
    }

    /// Returns the parsed timezone.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }
}
