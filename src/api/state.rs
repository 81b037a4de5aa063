//! Application state for the Time Clock Analyzer API.

use std::sync::Arc;

use crate::config::ScheduleConfig;

/// Shared application state.
///
/// Holds the schedule every request is analyzed against. The schedule is
/// immutable for the lifetime of the server.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ScheduleConfig>,
}

impl AppState {
    /// Creates a new application state with the given schedule.
    pub fn new(config: ScheduleConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns the schedule.
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }
}
