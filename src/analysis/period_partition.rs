//! Two-week period partitioning.
//!
//! Splits punch records into contiguous 14-day windows, the first of which
//! starts on the Monday on or before the earliest in-date.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{Period, PunchRecord};

/// Length of every analysis period, in days.
pub const PERIOD_LENGTH_DAYS: u64 = 14;

/// A period together with the records whose in-date falls inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodPartition {
    /// The window.
    pub period: Period,
    /// Records in the window, in input order.
    pub records: Vec<PunchRecord>,
}

/// The Monday on or before `date`.
///
/// # Example
///
/// ```
/// use timeclock_analyzer::analysis::period_anchor;
/// use chrono::NaiveDate;
///
/// // 2024-03-07 is a Thursday
/// let thursday = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
/// assert_eq!(period_anchor(thursday), NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
/// ```
pub fn period_anchor(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Builds the periods covering `first..=last`.
///
/// The first period starts on [`period_anchor`] of `first`; periods continue
/// until `last` is covered. Returns an empty list if `last < first`.
pub fn build_periods(first: NaiveDate, last: NaiveDate) -> Vec<Period> {
    let mut periods = Vec::new();
    let mut start = period_anchor(first);

    while start <= last {
        let Some(end) = start.checked_add_days(Days::new(PERIOD_LENGTH_DAYS)) else {
            break;
        };
        periods.push(Period {
            index: periods.len(),
            start,
            end,
        });
        start = end;
    }

    periods
}

/// Finds the period containing `date` by binary search over period starts.
pub fn period_index_for(periods: &[Period], date: NaiveDate) -> Option<usize> {
    let after = periods.partition_point(|p| p.start <= date);
    let candidate = after.checked_sub(1)?;
    periods[candidate]
        .contains_date(date)
        .then_some(candidate)
}

/// Splits records into two-week periods.
///
/// Every record lands in exactly one partition, chosen by its in-date alone,
/// so the result does not depend on input order beyond the order of records
/// within a partition.
///
/// # Example
///
/// ```
/// use timeclock_analyzer::analysis::partition_by_period;
/// use timeclock_analyzer::models::PunchRecord;
/// use chrono::NaiveDate;
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
/// let records = vec![
///     PunchRecord::same_day(1, "A", day(20), None, None),
///     PunchRecord::same_day(2, "A", day(6), None, None),
/// ];
///
/// let partitions = partition_by_period(&records);
/// assert_eq!(partitions.len(), 2);
/// assert_eq!(partitions[0].period.start, day(4));
/// assert_eq!(partitions[0].records[0].row, 2);
/// assert_eq!(partitions[1].records[0].row, 1);
/// ```
pub fn partition_by_period(records: &[PunchRecord]) -> Vec<PeriodPartition> {
    let (Some(first), Some(last)) = (
        records.iter().map(|r| r.in_date).min(),
        records.iter().map(|r| r.in_date).max(),
    ) else {
        return Vec::new();
    };

    let periods = build_periods(first, last);
    let mut partitions: Vec<PeriodPartition> = periods
        .iter()
        .map(|period| PeriodPartition {
            period: *period,
            records: Vec::new(),
        })
        .collect();

    for record in records {
        if let Some(index) = period_index_for(&periods, record.in_date) {
            partitions[index].records.push(record.clone());
        }
    }

    partitions
}
