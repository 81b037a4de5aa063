//! End-to-end analysis run.
//!
//! Chains the stages in order: partition, resolve, classify, aggregate.
//! Each stage is a pure function of its input, so a run over the same
//! records and config always produces the same [`AnalysisResult`].

use std::io::Read;
use std::time::Instant;

use tracing::{debug, info};

use crate::config::ScheduleConfig;
use crate::error::{EngineError, EngineResult};
use crate::ingest::load_punches;
use crate::models::{AnalysisResult, Anomaly, DayPunches, Period, PunchRecord, RecordIssue};

use super::{
    classify_day, find_missed_days, partition_by_period, rank_employees, resolve_period,
    summarize,
};

/// Runs a full analysis over parsed punch records.
///
/// `issues` are the rows rejected while loading; they are carried through to
/// the result unchanged.
///
/// # Errors
///
/// Returns [`EngineError::EmptyDataset`] if `records` is empty.
///
/// # Example
///
/// ```
/// use timeclock_analyzer::analysis::analyze;
/// use timeclock_analyzer::config::ScheduleConfig;
/// use timeclock_analyzer::models::{AnomalyKind, ClockTime, PunchRecord};
/// use chrono::NaiveDate;
///
/// let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let (late, lunch, back, end) = (
///     Some(ClockTime::at(8, 8)),
///     Some(ClockTime::at(12, 0)),
///     Some(ClockTime::at(12, 30)),
///     Some(ClockTime::at(16, 30)),
/// );
/// let records = vec![
///     PunchRecord::same_day(1, "A", monday, late, lunch),
///     PunchRecord::same_day(2, "A", monday, back, end),
/// ];
///
/// let result = analyze(records, Vec::new(), &ScheduleConfig::default()).unwrap();
/// assert_eq!(result.periods.len(), 1);
/// assert_eq!(result.anomalies[0].kind, AnomalyKind::LateArrival);
/// // The other nine workdays of the period are missed
/// assert_eq!(result.rankings[0].total_score, 5 + 9 * 10);
/// ```
pub fn analyze(
    records: Vec<PunchRecord>,
    issues: Vec<RecordIssue>,
    config: &ScheduleConfig,
) -> EngineResult<AnalysisResult> {
    let start_time = Instant::now();

    if records.is_empty() {
        return Err(EngineError::EmptyDataset {
            rejected: issues.len(),
        });
    }

    let partitions = partition_by_period(&records);
    debug!(periods = partitions.len(), "Partitioned records");

    let mut periods: Vec<Period> = Vec::with_capacity(partitions.len());
    let mut days: Vec<DayPunches> = Vec::new();
    let mut anomalies: Vec<Anomaly> = Vec::new();

    for partition in &partitions {
        let period_days = resolve_period(partition, config);
        for day in &period_days {
            anomalies.extend(classify_day(day, config));
        }
        anomalies.extend(find_missed_days(&partition.period, &period_days, config));
        debug!(
            period = partition.period.index,
            records = partition.records.len(),
            days = period_days.len(),
            "Resolved period"
        );

        periods.push(partition.period);
        days.extend(period_days);
    }

    days.sort_by(|a, b| a.employee.cmp(&b.employee).then(a.date.cmp(&b.date)));
    anomalies.sort_by(|a, b| {
        a.employee
            .cmp(&b.employee)
            .then(a.date.cmp(&b.date))
            .then(a.kind.cmp(&b.kind))
    });

    let summaries = summarize(&periods, &days, &anomalies);
    let rankings = rank_employees(&summaries, periods.len());

    let result = AnalysisResult {
        periods,
        days,
        anomalies,
        summaries,
        rankings,
        issues,
        records_analyzed: records.len(),
    };

    info!(
        records = result.records_analyzed,
        rejected = result.issues.len(),
        periods = result.periods.len(),
        employees = result.rankings.len(),
        anomalies = result.anomalies.len(),
        total_score = result.total_score(),
        duration_us = start_time.elapsed().as_micros() as u64,
        "Analysis completed"
    );

    Ok(result)
}

/// Loads a CSV export and analyzes it.
///
/// # Errors
///
/// Any error of [`load_punches`] or [`analyze`].
pub fn analyze_csv<R: Read>(reader: R, config: &ScheduleConfig) -> EngineResult<AnalysisResult> {
    let loaded = load_punches(reader)?;
    analyze(loaded.records, loaded.issues, config)
}
