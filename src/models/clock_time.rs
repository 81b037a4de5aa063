//! Wall-clock time of a single punch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analysis::{format_clock_time, parse_clock_time};
use crate::error::ParseError;

/// A wall-clock time stored as minutes since midnight, in `[0, 1439]`.
///
/// Serializes to and from the time clock's own `HH:MMa` / `HH:MMp` notation.
///
/// # Example
///
/// ```
/// use timeclock_analyzer::models::ClockTime;
///
/// let arrival: ClockTime = "07:54a".parse().unwrap();
/// assert_eq!(arrival.minutes(), 474);
/// assert_eq!(arrival.to_string(), "07:54a");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    /// Number of minutes in one day.
    pub const MINUTES_PER_DAY: u16 = 1440;

    /// Midnight (`12:00a`).
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Creates a time from minutes since midnight, or `None` if out of range.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < Self::MINUTES_PER_DAY).then_some(Self(minutes))
    }

    /// Creates a time from a 24-hour clock reading, wrapping past midnight.
    pub const fn at(hour: u16, minute: u16) -> Self {
        Self((hour * 60 + minute) % Self::MINUTES_PER_DAY)
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Absolute distance in minutes to another time on the same day.
    pub fn deviation_from(self, expected: ClockTime) -> u16 {
        self.0.abs_diff(expected.0)
    }

    /// Minutes from `self` until `later`, wrapping past midnight.
    pub fn minutes_until(self, later: ClockTime) -> u16 {
        if later.0 >= self.0 {
            later.0 - self.0
        } else {
            later.0 + Self::MINUTES_PER_DAY - self.0
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_clock_time(*self))
    }
}

impl FromStr for ClockTime {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_clock_time(s)?.ok_or_else(|| ParseError::MissingField {
            field: "time".to_string(),
        })
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minutes_rejects_out_of_range() {
        assert_eq!(ClockTime::from_minutes(1439).map(ClockTime::minutes), Some(1439));
        assert!(ClockTime::from_minutes(1440).is_none());
    }

    #[test]
    fn test_at_builds_24_hour_reading() {
        assert_eq!(ClockTime::at(16, 30).minutes(), 990);
        assert_eq!(ClockTime::at(24, 0), ClockTime::MIDNIGHT);
    }

    #[test]
    fn test_deviation_is_symmetric() {
        let a = ClockTime::at(8, 0);
        let b = ClockTime::at(8, 12);
        assert_eq!(a.deviation_from(b), 12);
        assert_eq!(b.deviation_from(a), 12);
    }

    #[test]
    fn test_minutes_until_wraps_past_midnight() {
        assert_eq!(ClockTime::at(8, 0).minutes_until(ClockTime::at(12, 0)), 240);
        assert_eq!(ClockTime::at(22, 0).minutes_until(ClockTime::at(2, 0)), 240);
    }

    #[test]
    fn test_serializes_as_clock_string() {
        let json = serde_json::to_string(&ClockTime::at(12, 30)).unwrap();
        assert_eq!(json, "\"12:30p\"");

        let parsed: ClockTime = serde_json::from_str("\"04:00p\"").unwrap();
        assert_eq!(parsed.minutes(), 960);
    }

    #[test]
    fn test_deserialize_rejects_malformed_string() {
        let result: Result<ClockTime, _> = serde_json::from_str("\"25:00p\"");
        assert!(result.is_err());
    }
}
