//! Score aggregation and ranking.
//!
//! Sums anomaly severities per employee per period and ranks employees
//! across the whole run.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{
    Anomaly, AnomalyKind, DayPunches, EmployeePeriodSummary, EmployeeRanking, Period,
};

/// A period score at or above this counts as a high-score period.
///
/// Equal to the weight of a single missed day.
pub const HIGH_SCORE_THRESHOLD: u32 = 10;

/// Builds one summary per employee per period.
///
/// Every employee seen in `days` gets a row for every period, including
/// periods where they have no punches (score zero). Rows are ordered by
/// employee, then period.
pub fn summarize(
    periods: &[Period],
    days: &[DayPunches],
    anomalies: &[Anomaly],
) -> Vec<EmployeePeriodSummary> {
    let mut summaries: BTreeMap<(&str, usize), EmployeePeriodSummary> = BTreeMap::new();

    let mut employees: Vec<&str> = days.iter().map(|d| d.employee.as_str()).collect();
    employees.sort_unstable();
    employees.dedup();

    for &employee in &employees {
        for period in periods {
            summaries.insert(
                (employee, period.index),
                EmployeePeriodSummary {
                    employee: employee.to_string(),
                    period_index: period.index,
                    score: 0,
                    anomaly_count: 0,
                    kind_counts: BTreeMap::new(),
                    worked_days: 0,
                    missed_days: 0,
                },
            );
        }
    }

    for day in days {
        if let Some(summary) = summaries.get_mut(&(day.employee.as_str(), day.period_index)) {
            summary.worked_days += 1;
        }
    }

    for anomaly in anomalies {
        let Some(summary) = summaries.get_mut(&(anomaly.employee.as_str(), anomaly.period_index))
        else {
            continue;
        };
        summary.score += anomaly.severity;
        summary.anomaly_count += 1;
        *summary.kind_counts.entry(anomaly.kind).or_insert(0) += 1;
        if anomaly.kind == AnomalyKind::MissedDay {
            summary.missed_days += 1;
        }
    }

    summaries.into_values().collect()
}

/// Ranks employees from their period summaries.
///
/// Order: average score descending, then total anomaly count descending,
/// then name ascending. Averages are taken over `period_count` periods and
/// rounded to two decimal places.
///
/// # Example
///
/// ```
/// use timeclock_analyzer::analysis::rank_employees;
/// use timeclock_analyzer::models::EmployeePeriodSummary;
/// use rust_decimal::Decimal;
/// use std::collections::BTreeMap;
///
/// let summary = |employee: &str, period_index, score, anomaly_count| EmployeePeriodSummary {
///     employee: employee.to_string(),
///     period_index,
///     score,
///     anomaly_count,
///     kind_counts: BTreeMap::new(),
///     worked_days: 10,
///     missed_days: 0,
/// };
///
/// let rankings = rank_employees(
///     &[
///         summary("A", 0, 4, 2),
///         summary("A", 1, 10, 1),
///         summary("B", 0, 20, 2),
///         summary("B", 1, 0, 0),
///     ],
///     2,
/// );
///
/// assert_eq!(rankings[0].employee, "B");
/// assert_eq!(rankings[0].average_score, Decimal::from(10));
/// assert_eq!(rankings[1].employee, "A");
/// assert_eq!(rankings[1].average_score, Decimal::from(7));
/// ```
pub fn rank_employees(
    summaries: &[EmployeePeriodSummary],
    period_count: usize,
) -> Vec<EmployeeRanking> {
    let mut totals: BTreeMap<&str, (u32, usize, usize)> = BTreeMap::new();
    for summary in summaries {
        let entry = totals.entry(summary.employee.as_str()).or_insert((0, 0, 0));
        entry.0 += summary.score;
        entry.1 += summary.anomaly_count;
        if summary.score >= HIGH_SCORE_THRESHOLD {
            entry.2 += 1;
        }
    }

    let divisor = Decimal::from(period_count.max(1));
    let mut rankings: Vec<EmployeeRanking> = totals
        .into_iter()
        .map(
            |(employee, (total_score, total_anomalies, high_score_periods))| EmployeeRanking {
                rank: 0,
                employee: employee.to_string(),
                average_score: (Decimal::from(total_score) / divisor).round_dp(2),
                total_score,
                high_score_periods,
                total_anomalies,
            },
        )
        .collect();

    // Every employee shares the divisor, so total score orders the same as
    // the unrounded average.
    rankings.sort_by(|a, b| {
        b.total_score
            .cmp(&a.total_score)
            .then_with(|| b.total_anomalies.cmp(&a.total_anomalies))
            .then_with(|| a.employee.cmp(&b.employee))
    });

    for (i, ranking) in rankings.iter_mut().enumerate() {
        ranking.rank = i + 1;
    }

    rankings
}
