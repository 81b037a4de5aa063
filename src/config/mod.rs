//! Configuration loading and management for the Time Clock Analyzer.
//!
//! This module provides the expected-schedule configuration and a loader
//! for reading it from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use timeclock_analyzer::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/schedule.yaml").unwrap();
//! println!("Expected arrival: {}", config.config().morning_arrival);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DEFAULT_BUFFER_MINUTES, ScheduleConfig};
