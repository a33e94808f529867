//! Configuration loading and management for the timesheet engine.
//!
//! This module loads the timezone, trigger hours, employee profile and
//! dispatch retry policy from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use timesheet_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/bc").unwrap();
//! println!("Timezone: {}", config.timezone());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DispatchSettings, EmployeeProfile, ScheduleSettings, TimesheetConfig};
