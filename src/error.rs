//! Error types for the timesheet engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while resolving pay periods,
//! loading configuration, scheduling triggers and dispatching timesheets.

use thiserror::Error;

/// The main error type for the timesheet engine.
///
/// # Example
///
/// ```
/// use timesheet_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/schedule.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/schedule.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The requested pay period does not exist in the given month.
    #[error("Invalid pay period {year}-{month:02} days {start_day}..={end_day}: {message}")]
    InvalidPeriod {
        /// The requested year.
        year: i32,
        /// The requested month (1-12).
        month: u32,
        /// The requested first day of the period.
        start_day: u32,
        /// The requested last day of the period.
        end_day: u32,
        /// A description of which bound was violated.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The configured timezone is not a known IANA zone name.
    #[error("Unknown timezone: {timezone}")]
    InvalidTimezone {
        /// The timezone string that failed to parse.
        timezone: String,
    },

    /// A trigger could not be planned or registered.
    #[error("Scheduling error: {message}")]
    SchedulingError {
        /// A description of the scheduling failure.
        message: String,
    },

    /// A timesheet export or email failed after exhausting the retry policy.
    #[error("Dispatch of '{label}' failed after {attempts} attempt(s): {message}")]
    DispatchFailed {
        /// The pay period label being dispatched.
        label: String,
        /// How many attempts were made.
        attempts: u32,
        /// The last collaborator error.
        message: String,
    },
}

impl EngineError {
    pub(crate) fn invalid_period(
        year: i32,
        month: u32,
        start_day: u32,
        end_day: u32,
        message: impl Into<String>,
    ) -> Self {
        EngineError::InvalidPeriod {
            year,
            month,
            start_day,
            end_day,
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
