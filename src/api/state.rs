//! Application state for the timesheet engine API.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::schedule::ScheduleOrchestrator;

/// Shared application state.
///
/// Holds the loaded configuration and the orchestrator built from it.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    orchestrator: ScheduleOrchestrator,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        let orchestrator = ScheduleOrchestrator::from_config(&config);
        Self {
            config: Arc::new(config),
            orchestrator,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the schedule orchestrator.
    pub fn orchestrator(&self) -> &ScheduleOrchestrator {
        &self.orchestrator
    }
}
