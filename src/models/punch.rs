//! Punch record model.
//!
//! A [`PunchRecord`] is one row of the time clock export: a single in/out pair
//! for one employee.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::ClockTime;

/// One in/out punch pair as exported by the time clock.
///
/// Either time may be missing when the employee forgot to punch; a record
/// with neither time is rejected by the loader.
///
/// # Example
///
/// ```
/// use timeclock_analyzer::models::{ClockTime, PunchRecord};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let record = PunchRecord::same_day(
///     1,
///     "Santos, Clayton",
///     date,
///     Some(ClockTime::at(7, 54)),
///     Some(ClockTime::at(12, 1)),
/// );
///
/// assert!(record.is_complete());
/// assert!(!record.has_date_mismatch());
/// assert_eq!(record.worked_minutes(), Some(247));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchRecord {
    /// 1-based row number in the source export, excluding the header.
    pub row: usize,
    /// Employee display name (`DisplayAs`).
    pub employee: String,
    /// Date of the in-punch. Determines the record's day and period.
    pub in_date: NaiveDate,
    /// Date of the out-punch, absent when the export left it blank.
    pub out_date: Option<NaiveDate>,
    /// In-punch time.
    pub in_time: Option<ClockTime>,
    /// Out-punch time.
    pub out_time: Option<ClockTime>,
    /// Day-of-week text of the in-punch, as exported.
    pub in_dow: String,
    /// Day-of-week text of the out-punch, as exported.
    pub out_dow: String,
}

impl PunchRecord {
    /// Builds a record whose in and out punches fall on the same date.
    pub fn same_day(
        row: usize,
        employee: impl Into<String>,
        date: NaiveDate,
        in_time: Option<ClockTime>,
        out_time: Option<ClockTime>,
    ) -> Self {
        let dow = date.weekday().to_string();
        Self {
            row,
            employee: employee.into(),
            in_date: date,
            out_date: Some(date),
            in_time,
            out_time,
            in_dow: dow.clone(),
            out_dow: dow,
        }
    }

    /// Replaces the out-date and its day-of-week text.
    pub fn with_out_date(mut self, out_date: NaiveDate) -> Self {
        self.out_dow = out_date.weekday().to_string();
        self.out_date = Some(out_date);
        self
    }

    /// Returns true if the out-date differs from the in-date.
    ///
    /// A blank out-date counts as a mismatch.
    pub fn has_date_mismatch(&self) -> bool {
        self.out_date != Some(self.in_date)
    }

    /// Returns true if both punch times are present.
    pub fn is_complete(&self) -> bool {
        self.in_time.is_some() && self.out_time.is_some()
    }

    /// The time used to order records within a day.
    ///
    /// Falls back to the out-time when the in-punch is missing.
    pub fn reference_time(&self) -> Option<ClockTime> {
        self.in_time.or(self.out_time)
    }

    /// Minutes between the in and out punches, wrapping past midnight.
    pub fn worked_minutes(&self) -> Option<u16> {
        match (self.in_time, self.out_time) {
            (Some(start), Some(end)) => Some(start.minutes_until(end)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_same_day_fills_day_of_week() {
        // 2024-03-04 is a Monday
        let record = PunchRecord::same_day(1, "A", make_date("2024-03-04"), None, None);
        assert_eq!(record.in_dow, "Mon");
        assert_eq!(record.out_dow, "Mon");
        assert_eq!(record.out_date, Some(make_date("2024-03-04")));
    }

    #[test]
    fn test_date_mismatch_detected() {
        let record = PunchRecord::same_day(
            1,
            "A",
            make_date("2024-03-01"),
            Some(ClockTime::at(8, 0)),
            Some(ClockTime::at(12, 0)),
        )
        .with_out_date(make_date("2024-03-02"));

        assert!(record.has_date_mismatch());
        assert_eq!(record.out_dow, "Sat");
    }

    #[test]
    fn test_blank_out_date_is_a_mismatch() {
        let mut record = PunchRecord::same_day(
            1,
            "A",
            make_date("2024-03-01"),
            Some(ClockTime::at(12, 30)),
            None,
        );
        record.out_date = None;
        assert!(record.has_date_mismatch());
    }

    #[test]
    fn test_reference_time_falls_back_to_out_time() {
        let record = PunchRecord::same_day(
            1,
            "A",
            make_date("2024-03-01"),
            None,
            Some(ClockTime::at(16, 0)),
        );
        assert_eq!(record.reference_time(), Some(ClockTime::at(16, 0)));
        assert!(!record.is_complete());
        assert_eq!(record.worked_minutes(), None);
    }

    #[test]
    fn test_worked_minutes_across_midnight() {
        let record = PunchRecord::same_day(
            1,
            "A",
            make_date("2024-03-01"),
            Some(ClockTime::at(23, 0)),
            Some(ClockTime::at(1, 30)),
        );
        assert_eq!(record.worked_minutes(), Some(150));
    }
}
