//! Punch-by-punch heat map grid.
//!
//! Builds a row per employee per date with a status for each of the four
//! expected punches. Rendering is left to the consumer; the grid serializes
//! to JSON.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::ScheduleConfig;
use crate::models::{AnalysisResult, ClockTime, DayPunches, PunchRecord};

/// Deviations up to this many minutes are on time.
pub const ON_TIME_MINUTES: u16 = 5;

/// Deviations above the buffer and up to this many minutes are major.
pub const MAJOR_MINUTES: u16 = 11;

/// Worked time below this is flagged as under hours.
pub const UNDER_HOURS_MINUTES: u32 = 450;

/// Worked time above this is flagged as over hours.
pub const OVER_HOURS_MINUTES: u32 = 510;

/// Text shown for a date with no records.
pub const ABSENT_TEXT: &str = "N/A";

/// Text shown for a slot with no punch.
pub const MISSING_TEXT: &str = "--";

/// Status of one timing cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStatus {
    /// Within [`ON_TIME_MINUTES`] of the expected time.
    OnTime,
    /// Within the schedule buffer.
    Minor,
    /// Within [`MAJOR_MINUTES`].
    Major,
    /// Further out than [`MAJOR_MINUTES`].
    Significant,
    /// Out-punch on a record whose out-date differs from its in-date.
    MissedOutPunch,
    /// The day has more than two records.
    MultiplePunches,
    /// The slot or its timestamp is missing.
    Missing,
    /// No records on the date.
    Absent,
}

/// Band for the total hours cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoursBand {
    /// No records on the date.
    Absent,
    /// Less than 7.5 hours.
    Under,
    /// Between 7.5 and 8.5 hours inclusive.
    Normal,
    /// More than 8.5 hours.
    Over,
}

/// One timing cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapCell {
    /// Punch time as printed, or a placeholder.
    pub text: String,
    /// Classification of the cell.
    pub status: CellStatus,
    /// Minutes from the expected time, when a time was compared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deviation_minutes: Option<u16>,
}

impl HeatmapCell {
    fn absent() -> Self {
        Self {
            text: ABSENT_TEXT.to_string(),
            status: CellStatus::Absent,
            deviation_minutes: None,
        }
    }

    fn plain(time: Option<ClockTime>, status: CellStatus) -> Self {
        Self {
            text: time_text(time),
            status,
            deviation_minutes: None,
        }
    }

    fn timed(time: ClockTime, deviation: u16, buffer: u16) -> Self {
        Self {
            text: time.to_string(),
            status: deviation_status(deviation, buffer),
            deviation_minutes: Some(deviation),
        }
    }
}

/// Total worked time for one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursCell {
    /// Worked minutes across all pairs.
    pub minutes: u32,
    /// `H:MM`, or [`ABSENT_TEXT`].
    pub text: String,
    /// Band the total falls in.
    pub band: HoursBand,
}

/// One employee on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapRow {
    /// Employee display name.
    pub employee: String,
    /// The date.
    pub date: NaiveDate,
    /// `MM/DD (Ddd)`.
    pub label: String,
    /// Morning in-punch.
    pub morning_arrival: HeatmapCell,
    /// Morning out-punch.
    pub lunch_departure: HeatmapCell,
    /// Afternoon in-punch.
    pub lunch_return: HeatmapCell,
    /// Afternoon out-punch.
    pub end_of_day: HeatmapCell,
    /// Worked time.
    pub total_hours: HoursCell,
}

/// The full grid, ordered by employee then date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapGrid {
    /// Every date on which any employee has a record.
    pub dates: Vec<NaiveDate>,
    /// Employees in name order.
    pub employees: Vec<String>,
    /// One row per employee per date.
    pub rows: Vec<HeatmapRow>,
}

fn time_text(time: Option<ClockTime>) -> String {
    time.map(|t| t.to_string())
        .unwrap_or_else(|| MISSING_TEXT.to_string())
}

/// Maps a deviation in minutes to a cell status.
///
/// # Example
///
/// ```
/// use timeclock_analyzer::report::{deviation_status, CellStatus};
///
/// assert_eq!(deviation_status(5, 7), CellStatus::OnTime);
/// assert_eq!(deviation_status(7, 7), CellStatus::Minor);
/// assert_eq!(deviation_status(11, 7), CellStatus::Major);
/// assert_eq!(deviation_status(12, 7), CellStatus::Significant);
/// ```
pub fn deviation_status(deviation: u16, buffer: u16) -> CellStatus {
    if deviation <= ON_TIME_MINUTES {
        CellStatus::OnTime
    } else if deviation <= buffer {
        CellStatus::Minor
    } else if deviation <= MAJOR_MINUTES {
        CellStatus::Major
    } else {
        CellStatus::Significant
    }
}

/// Formats minutes as `H:MM`.
pub fn format_hours(minutes: u32) -> String {
    format!("{}:{:02}", minutes / 60, minutes % 60)
}

fn hours_cell(day: Option<&DayPunches>) -> HoursCell {
    let Some(day) = day else {
        return HoursCell {
            minutes: 0,
            text: ABSENT_TEXT.to_string(),
            band: HoursBand::Absent,
        };
    };

    let minutes = day.worked_minutes();
    let band = if minutes < UNDER_HOURS_MINUTES {
        HoursBand::Under
    } else if minutes > OVER_HOURS_MINUTES {
        HoursBand::Over
    } else {
        HoursBand::Normal
    };

    HoursCell {
        minutes,
        text: format_hours(minutes),
        band,
    }
}

fn in_cell(
    record: Option<&PunchRecord>,
    expected: ClockTime,
    config: &ScheduleConfig,
) -> HeatmapCell {
    match record.and_then(|r| r.in_time) {
        Some(time) => {
            HeatmapCell::timed(time, time.deviation_from(expected), config.buffer_minutes)
        }
        None => HeatmapCell::plain(None, CellStatus::Missing),
    }
}

fn out_cell(
    record: Option<&PunchRecord>,
    deviation: impl Fn(ClockTime) -> u16,
    config: &ScheduleConfig,
) -> HeatmapCell {
    let Some(record) = record else {
        return HeatmapCell::plain(None, CellStatus::Missing);
    };
    if record.has_date_mismatch() {
        return HeatmapCell::plain(record.out_time, CellStatus::MissedOutPunch);
    }
    match record.out_time {
        Some(time) => HeatmapCell::timed(time, deviation(time), config.buffer_minutes),
        None => HeatmapCell::plain(None, CellStatus::Missing),
    }
}

fn build_row(
    employee: &str,
    date: NaiveDate,
    day: Option<&DayPunches>,
    config: &ScheduleConfig,
) -> HeatmapRow {
    let label = format!("{} ({})", date.format("%m/%d"), date.format("%a"));
    let total_hours = hours_cell(day);

    let [morning_arrival, lunch_departure, lunch_return, end_of_day] = match day {
        None => [
            HeatmapCell::absent(),
            HeatmapCell::absent(),
            HeatmapCell::absent(),
            HeatmapCell::absent(),
        ],
        Some(day) if day.pair_count() > 2 => {
            let morning = day.morning();
            let afternoon = day.afternoon();
            [
                morning.and_then(|r| r.in_time),
                morning.and_then(|r| r.out_time),
                afternoon.and_then(|r| r.in_time),
                afternoon.and_then(|r| r.out_time),
            ]
            .map(|time| HeatmapCell::plain(time, CellStatus::MultiplePunches))
        }
        Some(day) => {
            let morning = day.morning();
            let afternoon = day.afternoon();
            [
                in_cell(morning, config.morning_arrival, config),
                out_cell(morning, |t| t.deviation_from(config.lunch_departure), config),
                in_cell(afternoon, config.lunch_return, config),
                out_cell(afternoon, |t| config.end_time_deviation(t), config),
            ]
        }
    };

    HeatmapRow {
        employee: employee.to_string(),
        date,
        label,
        morning_arrival,
        lunch_departure,
        lunch_return,
        end_of_day,
        total_hours,
    }
}

/// Builds the heat map grid for an analysis run.
///
/// Every employee gets a row for every date on which anyone punched, so
/// absences line up across employees.
pub fn build_heatmap(result: &AnalysisResult, config: &ScheduleConfig) -> HeatmapGrid {
    let by_key: BTreeMap<(&str, NaiveDate), &DayPunches> = result
        .days
        .iter()
        .map(|d| ((d.employee.as_str(), d.date), d))
        .collect();
    let dates: Vec<NaiveDate> = result
        .days
        .iter()
        .map(|d| d.date)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let employees: Vec<String> = result
        .employees()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::with_capacity(employees.len() * dates.len());
    for employee in &employees {
        for date in &dates {
            let day = by_key.get(&(employee.as_str(), *date)).copied();
            rows.push(build_row(employee, *date, day, config));
        }
    }

    HeatmapGrid {
        dates,
        employees,
        rows,
    }
}
