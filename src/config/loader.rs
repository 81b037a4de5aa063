//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the expected
//! schedule from a YAML file.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::ScheduleConfig;

/// Loads and validates a schedule configuration.
///
/// # File Format
///
/// ```yaml
/// morning_arrival: "08:00a"
/// lunch_departure: "12:00p"
/// lunch_return: "12:30p"
/// end_times: ["04:00p", "04:30p"]
/// buffer_minutes: 7          # optional, defaults to 7
/// workdays: [Mon, Tue, Wed, Thu, Fri]   # optional
/// ```
///
/// # Example
///
/// ```no_run
/// use timeclock_analyzer::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/schedule.yaml").unwrap();
/// println!("Buffer: {} minutes", loader.config().buffer_minutes);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ScheduleConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file is not valid YAML or has malformed times (`ConfigParseError`)
    /// - The schedule is impossible (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content, &path_str)
    }

    /// Parses configuration from YAML text.
    ///
    /// `source` names the origin of the text in error messages.
    pub fn from_yaml_str(content: &str, source: &str) -> EngineResult<Self> {
        let config: ScheduleConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: source.to_string(),
                message: e.to_string(),
            })?;

        config.validate()?;
        debug!(
            source = %source,
            buffer_minutes = config.buffer_minutes,
            "Loaded schedule configuration"
        );

        Ok(Self { config })
    }

    /// Returns the loaded schedule.
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Consumes the loader, returning the schedule.
    pub fn into_config(self) -> ScheduleConfig {
        self.config
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            config: ScheduleConfig::default(),
        }
    }
}
