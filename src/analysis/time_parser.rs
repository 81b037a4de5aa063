//! Time clock notation parsing.
//!
//! The time clock exports times as `HH:MM` followed by `a` or `p`
//! (e.g. `07:54a`) and dates as `MM/DD/YY`.

use chrono::NaiveDate;

use crate::error::ParseError;
use crate::models::ClockTime;

/// Date format used by the time clock export.
pub const PUNCH_DATE_FORMAT: &str = "%m/%d/%y";

/// Parses a time clock time into minutes since midnight.
///
/// Returns `Ok(None)` for an empty or whitespace-only value, which the export
/// uses for a missing punch. The suffix is case-insensitive.
///
/// Hour 12 with `a` is midnight and hour 12 with `p` is noon; any other hour
/// maps directly, plus twelve hours for `p`.
///
/// # Errors
///
/// - [`ParseError::InvalidTime`] if the value is not `H:MM` or `HH:MM`
///   followed by `a`/`p`.
/// - [`ParseError::TimeOutOfRange`] if the hour is not 1-12 or the minute
///   is over 59.
///
/// # Example
///
/// ```
/// use timeclock_analyzer::analysis::parse_clock_time;
///
/// assert_eq!(parse_clock_time("08:00a").unwrap().unwrap().minutes(), 480);
/// assert_eq!(parse_clock_time("04:30p").unwrap().unwrap().minutes(), 990);
/// assert_eq!(parse_clock_time("12:00p").unwrap().unwrap().minutes(), 720);
/// assert_eq!(parse_clock_time("12:00a").unwrap().unwrap().minutes(), 0);
/// assert_eq!(parse_clock_time("").unwrap(), None);
/// assert!(parse_clock_time("8am").is_err());
/// ```
pub fn parse_clock_time(value: &str) -> Result<Option<ClockTime>, ParseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let invalid = || ParseError::InvalidTime {
        value: trimmed.to_string(),
    };
    let out_of_range = || ParseError::TimeOutOfRange {
        value: trimmed.to_string(),
    };

    let lower = trimmed.to_ascii_lowercase();
    let (body, is_pm) = if let Some(body) = lower.strip_suffix('a') {
        (body, false)
    } else if let Some(body) = lower.strip_suffix('p') {
        (body, true)
    } else {
        return Err(invalid());
    };

    let (hour_text, minute_text) = body.split_once(':').ok_or_else(invalid)?;
    if !is_digits(hour_text, 1..=2) || !is_digits(minute_text, 2..=2) {
        return Err(invalid());
    }

    let hour: u16 = hour_text.parse().map_err(|_| invalid())?;
    let minute: u16 = minute_text.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&hour) || minute > 59 {
        return Err(out_of_range());
    }

    let hour = match (hour, is_pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };

    Ok(ClockTime::from_minutes(hour * 60 + minute))
}

fn is_digits(text: &str, len: std::ops::RangeInclusive<usize>) -> bool {
    len.contains(&text.len()) && text.bytes().all(|b| b.is_ascii_digit())
}

/// Formats minutes since midnight in time clock notation.
///
/// The inverse of [`parse_clock_time`]: the hour is always two digits, and
/// midnight is written `12:00a`.
///
/// # Example
///
/// ```
/// use timeclock_analyzer::analysis::format_clock_time;
/// use timeclock_analyzer::models::ClockTime;
///
/// assert_eq!(format_clock_time(ClockTime::at(7, 54)), "07:54a");
/// assert_eq!(format_clock_time(ClockTime::at(0, 5)), "12:05a");
/// assert_eq!(format_clock_time(ClockTime::at(16, 30)), "04:30p");
/// ```
pub fn format_clock_time(time: ClockTime) -> String {
    let minutes = time.minutes();
    let hour = minutes / 60;
    let suffix = if hour < 12 { 'a' } else { 'p' };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{:02}:{:02}{}", display_hour, minutes % 60, suffix)
}

/// Parses a time clock date (`MM/DD/YY`).
///
/// Returns `Ok(None)` for an empty value.
///
/// # Errors
///
/// Returns [`ParseError::InvalidDate`] if the value is not a valid date in
/// the export format.
pub fn parse_punch_date(value: &str) -> Result<Option<NaiveDate>, ParseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(trimmed, PUNCH_DATE_FORMAT)
        .map(Some)
        .map_err(|_| ParseError::InvalidDate {
            value: trimmed.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minutes(value: &str) -> u16 {
        parse_clock_time(value).unwrap().unwrap().minutes()
    }

    // ==========================================================================
    // TP-001: noon and midnight
    // ==========================================================================
    #[test]
    fn test_tp_001_twelve_oclock_mapping() {
        assert_eq!(minutes("12:00a"), 0);
        assert_eq!(minutes("12:59a"), 59);
        assert_eq!(minutes("12:00p"), 720);
        assert_eq!(minutes("12:45p"), 765);
    }

    // ==========================================================================
    // TP-002: ordinary morning and afternoon times
    // ==========================================================================
    #[test]
    fn test_tp_002_am_pm_mapping() {
        assert_eq!(minutes("07:54a"), 474);
        assert_eq!(minutes("08:00a"), 480);
        assert_eq!(minutes("04:30p"), 990);
        assert_eq!(minutes("11:59p"), 1439);
    }

    #[test]
    fn test_single_digit_hour_and_case() {
        assert_eq!(minutes("8:07a"), 487);
        assert_eq!(minutes(" 04:00P "), 960);
    }

    #[test]
    fn test_empty_is_missing() {
        assert_eq!(parse_clock_time("").unwrap(), None);
        assert_eq!(parse_clock_time("   ").unwrap(), None);
    }

    #[test]
    fn test_malformed_values() {
        for value in ["0800a", "08:00", "8am", "ab:cda", "08:0a", "08:000a", ":30p"] {
            assert!(
                matches!(parse_clock_time(value), Err(ParseError::InvalidTime { .. })),
                "expected InvalidTime for {:?}",
                value
            );
        }
    }

    #[test]
    fn test_out_of_range_values() {
        for value in ["13:00p", "00:30a", "08:60a"] {
            assert!(
                matches!(parse_clock_time(value), Err(ParseError::TimeOutOfRange { .. })),
                "expected TimeOutOfRange for {:?}",
                value
            );
        }
    }

    #[test]
    fn test_format_round_trips_every_minute() {
        for m in 0..ClockTime::MINUTES_PER_DAY {
            let time = ClockTime::from_minutes(m).unwrap();
            let text = format_clock_time(time);
            assert_eq!(parse_clock_time(&text).unwrap(), Some(time), "{}", text);
        }
    }

    #[test]
    fn test_parse_punch_date() {
        assert_eq!(
            parse_punch_date("03/01/24").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(parse_punch_date("").unwrap(), None);
        assert!(matches!(
            parse_punch_date("2024-03-01"),
            Err(ParseError::InvalidDate { .. })
        ));
        assert!(parse_punch_date("02/30/24").is_err());
    }
}
