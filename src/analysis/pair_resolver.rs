//! Punch pair resolution.
//!
//! Groups an employee's records for one date into the expected morning and
//! afternoon pairs, pushing anything beyond the first two into extras.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::config::ScheduleConfig;
use crate::models::{DayPunches, PunchPair, PunchRecord, ShiftSlot};

use super::PeriodPartition;

/// Resolves one employee's records for one date into schedule slots.
///
/// Records are ordered by in-time (out-time when the in-punch is missing),
/// then by row number.
///
/// - One record: morning if it starts before the expected lunch departure,
///   afternoon otherwise.
/// - Two or more: the first is morning, the second afternoon, the rest extra.
///
/// # Example
///
/// ```
/// use timeclock_analyzer::analysis::resolve_day;
/// use timeclock_analyzer::config::ScheduleConfig;
/// use timeclock_analyzer::models::{ClockTime, PunchRecord};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let afternoon = PunchRecord::same_day(
///     2, "A", date, Some(ClockTime::at(12, 30)), Some(ClockTime::at(16, 30)),
/// );
/// let morning = PunchRecord::same_day(
///     1, "A", date, Some(ClockTime::at(8, 0)), Some(ClockTime::at(12, 0)),
/// );
///
/// let day = resolve_day("A", date, 0, vec![afternoon, morning], &ScheduleConfig::default());
/// assert_eq!(day.morning().map(|r| r.row), Some(1));
/// assert_eq!(day.afternoon().map(|r| r.row), Some(2));
/// ```
pub fn resolve_day(
    employee: &str,
    date: NaiveDate,
    period_index: usize,
    mut records: Vec<PunchRecord>,
    config: &ScheduleConfig,
) -> DayPunches {
    records.sort_by_key(|r| (r.reference_time(), r.row));

    let pairs = if records.len() == 1 {
        let slot = match records[0].reference_time() {
            Some(time) if time >= config.lunch_departure => ShiftSlot::Afternoon,
            _ => ShiftSlot::Morning,
        };
        records
            .into_iter()
            .map(|record| PunchPair { slot, record })
            .collect()
    } else {
        records
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                let slot = match i {
                    0 => ShiftSlot::Morning,
                    1 => ShiftSlot::Afternoon,
                    _ => ShiftSlot::Extra,
                };
                PunchPair { slot, record }
            })
            .collect()
    };

    DayPunches {
        employee: employee.to_string(),
        date,
        period_index,
        pairs,
    }
}

/// Resolves every employee-day within a period.
///
/// Days are returned ordered by employee, then date.
pub fn resolve_period(partition: &PeriodPartition, config: &ScheduleConfig) -> Vec<DayPunches> {
    let mut grouped: BTreeMap<(&str, NaiveDate), Vec<PunchRecord>> = BTreeMap::new();
    for record in &partition.records {
        grouped
            .entry((record.employee.as_str(), record.in_date))
            .or_default()
            .push(record.clone());
    }

    grouped
        .into_iter()
        .map(|((employee, date), records)| {
            resolve_day(employee, date, partition.period.index, records, config)
        })
        .collect()
}
