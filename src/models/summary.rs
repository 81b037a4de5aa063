//! Aggregated analysis output.
//!
//! This module contains the [`AnalysisResult`] type returned by the pipeline
//! and the summary rows derived from the anomaly list.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Anomaly, AnomalyKind, DayPunches, Period};

/// Score and counts for one employee in one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePeriodSummary {
    /// Employee display name.
    pub employee: String,
    /// Index of the period.
    pub period_index: usize,
    /// Sum of anomaly severities.
    pub score: u32,
    /// Number of anomalies.
    pub anomaly_count: usize,
    /// Number of anomalies per kind. Kinds with no anomalies are omitted.
    pub kind_counts: BTreeMap<AnomalyKind, usize>,
    /// Dates with at least one punch.
    pub worked_days: usize,
    /// Dates flagged as missed.
    pub missed_days: usize,
}

/// An employee's position in the run-wide ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRanking {
    /// 1-based rank.
    pub rank: usize,
    /// Employee display name.
    pub employee: String,
    /// Mean period score across every period of the run.
    pub average_score: Decimal,
    /// Sum of all period scores.
    pub total_score: u32,
    /// Number of periods whose score reached the high-score threshold.
    pub high_score_periods: usize,
    /// Number of anomalies across all periods.
    pub total_anomalies: usize,
}

/// A punch row that was rejected while loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordIssue {
    /// 1-based row number, excluding the header.
    pub row: usize,
    /// Employee name, when the row had one.
    pub employee: Option<String>,
    /// The column that failed.
    pub field: String,
    /// What went wrong.
    pub message: String,
}

/// The complete output of one analysis run.
///
/// Contains no timestamps or random identifiers, so identical input always
/// produces an identical value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// The two-week periods covering the data, in order.
    pub periods: Vec<Period>,
    /// Every resolved employee-day, ordered by employee then date.
    pub days: Vec<DayPunches>,
    /// Every anomaly, ordered by employee, date, then kind.
    pub anomalies: Vec<Anomaly>,
    /// One row per employee per period, ordered by employee then period.
    pub summaries: Vec<EmployeePeriodSummary>,
    /// Employees ordered by rank.
    pub rankings: Vec<EmployeeRanking>,
    /// Rows rejected during loading.
    pub issues: Vec<RecordIssue>,
    /// Number of records that were analyzed.
    pub records_analyzed: usize,
}

impl AnalysisResult {
    /// Sum of every anomaly's severity.
    pub fn total_score(&self) -> u32 {
        self.anomalies.iter().map(|a| a.severity).sum()
    }

    /// Summaries for a single period.
    pub fn summaries_for_period(
        &self,
        period_index: usize,
    ) -> impl Iterator<Item = &EmployeePeriodSummary> {
        self.summaries
            .iter()
            .filter(move |s| s.period_index == period_index)
    }

    /// Number of anomalies per kind across the run.
    pub fn kind_counts(&self) -> BTreeMap<AnomalyKind, usize> {
        let mut counts = BTreeMap::new();
        for anomaly in &self.anomalies {
            *counts.entry(anomaly.kind).or_insert(0) += 1;
        }
        counts
    }

    /// Distinct employee names, sorted.
    pub fn employees(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rankings.iter().map(|r| r.employee.as_str()).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            periods: vec![Period {
                index: 0,
                start: make_date("2024-03-04"),
                end: make_date("2024-03-18"),
            }],
            days: vec![],
            anomalies: vec![
                Anomaly::new("B", 0, make_date("2024-03-05"), AnomalyKind::MissedDay, "x"),
                Anomaly::new("A", 0, make_date("2024-03-04"), AnomalyKind::LateArrival, "y"),
                Anomaly::new("A", 0, make_date("2024-03-06"), AnomalyKind::LateArrival, "z"),
            ],
            summaries: vec![],
            rankings: vec![
                EmployeeRanking {
                    rank: 1,
                    employee: "B".to_string(),
                    average_score: Decimal::from(10),
                    total_score: 10,
                    high_score_periods: 1,
                    total_anomalies: 1,
                },
                EmployeeRanking {
                    rank: 2,
                    employee: "A".to_string(),
                    average_score: Decimal::from(10),
                    total_score: 10,
                    high_score_periods: 1,
                    total_anomalies: 2,
                },
            ],
            issues: vec![],
            records_analyzed: 10,
        }
    }

    #[test]
    fn test_total_score() {
        assert_eq!(sample_result().total_score(), 20);
    }

    #[test]
    fn test_kind_counts() {
        let counts = sample_result().kind_counts();
        assert_eq!(counts.get(&AnomalyKind::LateArrival), Some(&2));
        assert_eq!(counts.get(&AnomalyKind::MissedDay), Some(&1));
        assert_eq!(counts.get(&AnomalyKind::ExtraPunches), None);
    }

    #[test]
    fn test_employees_sorted() {
        assert_eq!(sample_result().employees(), vec!["A", "B"]);
    }

    #[test]
    fn test_result_serialization() {
        let result = sample_result();
        let json = serde_json::to_string(&result).unwrap();
        let deserialized: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, deserialized);
    }
}
