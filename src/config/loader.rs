//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading timesheet
//! configuration from YAML files.

use chrono_tz::Tz;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{DispatchSettings, EmployeeProfile, ScheduleSettings, TimesheetConfig};

/// Loads and provides access to timesheet configuration.
///
/// # Directory Structure
///
/// ```text
/// config/bc/
/// ├── schedule.yaml   # Timezone and trigger hours
/// ├── employee.yaml   # Employee name, email and timesheet recipients
/// └── dispatch.yaml   # Retry policy for export and email
/// ```
///
/// # Example
///
/// ```no_run
/// use timesheet_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/bc").unwrap();
/// println!("Timesheets for {}", loader.employee().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: TimesheetConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] when a required file is missing
    /// - [`EngineError::ConfigParseError`] when a file is not valid YAML, a
    ///   required field is missing, or a value is out of range
    /// - [`EngineError::InvalidTimezone`] when the timezone is not an IANA name
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let schedule_path = path.join("schedule.yaml");
        let schedule = Self::load_yaml::<ScheduleSettings>(&schedule_path)?;

        let employee_path = path.join("employee.yaml");
        let employee = Self::load_yaml::<EmployeeProfile>(&employee_path)?;

        let dispatch_path = path.join("dispatch.yaml");
        let dispatch = Self::load_yaml::<DispatchSettings>(&dispatch_path)?;

        Self::from_parts(schedule, employee, dispatch)
    }

    /// Validates already parsed settings.
    pub fn from_parts(
        schedule: ScheduleSettings,
        employee: EmployeeProfile,
        dispatch: DispatchSettings,
    ) -> EngineResult<Self> {
        let timezone = schedule.timezone.parse::<Tz>().map_err(|_| {
            EngineError::InvalidTimezone {
                timezone: schedule.timezone.clone(),
            }
        })?;

        for (field, hour) in [
            ("period_start_hour", schedule.period_start_hour),
            ("reminder_hour", schedule.reminder_hour),
        ] {
            if hour > 23 {
                return Err(EngineError::ConfigParseError {
                    path: "schedule.yaml".to_string(),
                    message: format!("{} must be between 0 and 23, got {}", field, hour),
                });
            }
        }

        if employee.recipients.is_empty() {
            return Err(EngineError::ConfigParseError {
                path: "employee.yaml".to_string(),
                message: "at least one recipient is required".to_string(),
            });
        }

        if dispatch.retry.max_attempts == 0 {
            return Err(EngineError::ConfigParseError {
                path: "dispatch.yaml".to_string(),
                message: "retry.max_attempts must be at least 1".to_string(),
            });
        }

        Ok(Self {
            config: TimesheetConfig::new(schedule, employee, dispatch, timezone),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &TimesheetConfig {
        &self.config
    }

    /// Returns the configured timezone.
    pub fn timezone(&self) -> Tz {
        self.config.timezone()
    }

    /// Returns the scheduling settings.
    pub fn schedule(&self) -> &ScheduleSettings {
        self.config.schedule()
    }

    /// Returns the employee profile.
    pub fn employee(&self) -> &EmployeeProfile {
        self.config.employee()
    }

    /// Returns the dispatch settings.
    pub fn dispatch(&self) -> &DispatchSettings {
        self.config.dispatch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::RetryPolicy;

    fn config_path() -> &'static str {
        "./config/bc"
    }

    fn schedule(timezone: &str) -> ScheduleSettings {
        ScheduleSettings {
            timezone: timezone.to_string(),
            period_start_hour: 8,
            reminder_hour: 9,
        }
    }

    fn employee() -> EmployeeProfile {
        EmployeeProfile {
            name: "Sam Rivera".to_string(),
            email: "sam@example.com".to_string(),
            recipients: vec!["payroll@example.com".to_string()],
        }
    }

    fn dispatch() -> DispatchSettings {
        DispatchSettings {
            retry: RetryPolicy {
                max_attempts: 3,
                backoff_base_ms: 10,
            },
            subject_prefix: "Timesheet".to_string(),
        }
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.timezone(), chrono_tz::America::Vancouver);
        assert_eq!(loader.schedule().period_start_hour, 8);
        assert_eq!(loader.schedule().reminder_hour, 9);
        assert_eq!(loader.dispatch().retry.max_attempts, 5);
        assert!(!loader.employee().recipients.is_empty());
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");
        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("schedule.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_timezone_is_rejected() {
        let result = ConfigLoader::from_parts(schedule("Mars/Olympus"), employee(), dispatch());
        match result {
            Err(EngineError::InvalidTimezone { timezone }) => assert_eq!(timezone, "Mars/Olympus"),
            other => panic!("Expected InvalidTimezone error, got {:?}", other),
        }
    }

    #[test]
    fn test_hour_out_of_range_is_rejected() {
        let mut bad = schedule("America/Vancouver");
        bad.reminder_hour = 24;
        assert!(matches!(
            ConfigLoader::from_parts(bad, employee(), dispatch()),
            Err(EngineError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_empty_recipients_is_rejected() {
        let mut nobody = employee();
        nobody.recipients.clear();
        assert!(matches!(
            ConfigLoader::from_parts(schedule("America/Vancouver"), nobody, dispatch()),
            Err(EngineError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_zero_attempts_is_rejected() {
        let mut never = dispatch();
        never.retry.max_attempts = 0;
        assert!(ConfigLoader::from_parts(schedule("UTC"), employee(), never).is_err());
    }

    #[test]
    fn test_subject_prefix_defaults() {
        let settings: DispatchSettings =
            serde_yaml::from_str("retry:\n  max_attempts: 2\n  backoff_base_ms: 5\n").unwrap();
        assert_eq!(settings.subject_prefix, "Timesheet");
    }
}
