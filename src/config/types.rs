//! Configuration types for schedule analysis.
//!
//! This module contains the strongly-typed schedule structure that is
//! deserialized from YAML configuration files.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::ClockTime;

/// Default symmetric buffer tolerance in minutes.
pub const DEFAULT_BUFFER_MINUTES: u16 = 7;

fn default_buffer_minutes() -> u16 {
    DEFAULT_BUFFER_MINUTES
}

fn default_workdays() -> Vec<Weekday> {
    vec![
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ]
}

/// The expected daily schedule every punch is compared against.
///
/// One configuration applies to every employee in a run.
///
/// # Example
///
/// ```
/// use timeclock_analyzer::config::ScheduleConfig;
///
/// let config = ScheduleConfig::default();
/// assert_eq!(config.morning_arrival.minutes(), 480);
/// assert_eq!(config.buffer_minutes, 7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Expected morning arrival.
    pub morning_arrival: ClockTime,
    /// Expected departure for lunch.
    pub lunch_departure: ClockTime,
    /// Expected return from lunch.
    pub lunch_return: ClockTime,
    /// Acceptable end-of-day times. A punch near any of them is on time.
    pub end_times: [ClockTime; 2],
    /// Allowed deviation, in minutes, on either side of an expected time.
    #[serde(default = "default_buffer_minutes")]
    pub buffer_minutes: u16,
    /// Days on which an active employee is expected to punch.
    #[serde(default = "default_workdays")]
    pub workdays: Vec<Weekday>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            morning_arrival: ClockTime::at(8, 0),
            lunch_departure: ClockTime::at(12, 0),
            lunch_return: ClockTime::at(12, 30),
            end_times: [ClockTime::at(16, 0), ClockTime::at(16, 30)],
            buffer_minutes: DEFAULT_BUFFER_MINUTES,
            workdays: default_workdays(),
        }
    }
}

impl ScheduleConfig {
    /// Checks that the schedule describes a possible working day.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if arrival is not before lunch
    /// departure, lunch return precedes lunch departure, an end time precedes
    /// lunch return, or the buffer is an hour or more.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| Err(EngineError::InvalidConfig { message });

        if self.morning_arrival >= self.lunch_departure {
            return invalid(format!(
                "morning arrival {} must be before lunch departure {}",
                self.morning_arrival, self.lunch_departure
            ));
        }
        if self.lunch_return < self.lunch_departure {
            return invalid(format!(
                "lunch return {} must not be before lunch departure {}",
                self.lunch_return, self.lunch_departure
            ));
        }
        if let Some(end) = self.end_times.iter().find(|t| **t <= self.lunch_return) {
            return invalid(format!(
                "end time {} must be after lunch return {}",
                end, self.lunch_return
            ));
        }
        if self.buffer_minutes >= 60 {
            return invalid(format!(
                "buffer of {} minutes must be under 60",
                self.buffer_minutes
            ));
        }
        Ok(())
    }

    /// Returns true if `time` is within the buffer of `expected`, inclusive.
    pub fn within_buffer(&self, time: ClockTime, expected: ClockTime) -> bool {
        time.deviation_from(expected) <= self.buffer_minutes
    }

    /// Returns true if `time` is later than `expected` plus the buffer.
    pub fn is_late(&self, time: ClockTime, expected: ClockTime) -> bool {
        time.minutes() > expected.minutes() + self.buffer_minutes
    }

    /// Distance to the nearest acceptable end time.
    pub fn end_time_deviation(&self, time: ClockTime) -> u16 {
        self.end_times
            .iter()
            .map(|end| time.deviation_from(*end))
            .min()
            .unwrap_or(u16::MAX)
    }

    /// Returns true if the weekday is a working day.
    pub fn is_workday(&self, weekday: Weekday) -> bool {
        self.workdays.contains(&weekday)
    }
}
