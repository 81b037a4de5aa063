//! Plain-text management report.

use std::fmt::Write;

use rust_decimal::Decimal;

use crate::analysis::HIGH_SCORE_THRESHOLD;
use crate::models::{AnalysisResult, AnomalyKind, EmployeePeriodSummary, EmployeeRanking};

const RULE_WIDTH: usize = 80;
const SECTION_WIDTH: usize = 40;

/// At most this many employees are listed as requiring attention.
pub const ATTENTION_LIMIT: usize = 5;

/// An employee needs attention with this many high-score periods.
pub const ATTENTION_HIGH_SCORE_PERIODS: usize = 2;

/// An employee needs attention with an average score at or above this.
pub const ATTENTION_AVERAGE_SCORE: u32 = 15;

fn needs_attention(ranking: &EmployeeRanking) -> bool {
    ranking.high_score_periods >= ATTENTION_HIGH_SCORE_PERIODS
        || ranking.average_score >= Decimal::from(ATTENTION_AVERAGE_SCORE)
}

fn heading(out: &mut String, title: &str) {
    out.push_str(title);
    out.push('\n');
    out.push_str(&"-".repeat(SECTION_WIDTH));
    out.push('\n');
}

/// Renders the management report for an analysis run.
///
/// The output depends only on `result`; it carries no run date, so the same
/// result always renders the same text.
///
/// # Example
///
/// ```
/// use timeclock_analyzer::analysis::analyze;
/// use timeclock_analyzer::config::ScheduleConfig;
/// use timeclock_analyzer::models::{ClockTime, PunchRecord};
/// use timeclock_analyzer::report::render_report;
/// use chrono::NaiveDate;
///
/// let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let at = |h, m| Some(ClockTime::at(h, m));
/// let records = vec![
///     PunchRecord::same_day(1, "A", monday, at(8, 0), at(12, 0)),
///     PunchRecord::same_day(2, "A", monday, at(12, 30), at(16, 30)),
/// ];
/// let result = analyze(records, Vec::new(), &ScheduleConfig::default()).unwrap();
///
/// let report = render_report(&result);
/// assert!(report.contains("Total Employees Analyzed: 1"));
/// assert!(report.contains("Missed Day: 9"));
/// assert!(report.contains("No data quality issues."));
/// ```
pub fn render_report(result: &AnalysisResult) -> String {
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);
    let period_count = result.periods.len();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "EMPLOYEE TIME CLOCK ANALYSIS REPORT");
    let _ = writeln!(out, "{}", rule);
    out.push('\n');

    heading(&mut out, "SUMMARY STATISTICS");
    let _ = writeln!(out, "Total Employees Analyzed: {}", result.rankings.len());
    let _ = writeln!(out, "Analysis Periods: {}", period_count);
    if let (Some(first), Some(last)) = (result.periods.first(), result.periods.last()) {
        let _ = writeln!(
            out,
            "Period Range: {} to {}",
            first.start.format("%m/%d/%y"),
            last.last_day().format("%m/%d/%y")
        );
    }
    let _ = writeln!(out, "Records Analyzed: {}", result.records_analyzed);
    let _ = writeln!(out, "Rows Rejected: {}", result.issues.len());
    let _ = writeln!(out, "Total Anomalies: {}", result.anomalies.len());
    let _ = writeln!(out, "Total Anomaly Score: {}", result.total_score());
    out.push('\n');

    heading(&mut out, "EMPLOYEES REQUIRING IMMEDIATE ATTENTION");
    let flagged: Vec<&EmployeeRanking> = result
        .rankings
        .iter()
        .filter(|r| needs_attention(r))
        .take(ATTENTION_LIMIT)
        .collect();
    if flagged.is_empty() {
        let _ = writeln!(out, "No employees require immediate attention.");
        out.push('\n');
    }
    for ranking in flagged {
        let _ = writeln!(out, "{}. {}", ranking.rank, ranking.employee);
        let _ = writeln!(out, "  Average Score: {:.1}", ranking.average_score);
        let _ = writeln!(
            out,
            "  High-Score Periods: {}/{}",
            ranking.high_score_periods, period_count
        );
        let _ = writeln!(out, "  Total Anomalies: {}", ranking.total_anomalies);
        out.push('\n');
    }

    heading(&mut out, "DETAILED PERIOD ANALYSIS");
    for period in &result.periods {
        let _ = writeln!(out, "Period {}: {}", period.index + 1, period.label());

        // Employees without punches in the period count as zero.
        let summaries: Vec<&EmployeePeriodSummary> =
            result.summaries_for_period(period.index).collect();
        if !summaries.iter().any(|s| s.worked_days > 0) {
            let _ = writeln!(out, "  No data for this period");
            out.push('\n');
            continue;
        }

        let total: u32 = summaries.iter().map(|s| s.score).sum();
        let average = Decimal::from(total) / Decimal::from(summaries.len());
        let missed: usize = summaries.iter().map(|s| s.missed_days).sum();
        let mut high: Vec<&EmployeePeriodSummary> = summaries
            .iter()
            .copied()
            .filter(|s| s.score >= HIGH_SCORE_THRESHOLD)
            .collect();
        high.sort_by(|a, b| b.score.cmp(&a.score).then(a.employee.cmp(&b.employee)));

        let _ = writeln!(out, "  Average Anomaly Score: {:.1}", average.round_dp(1));
        let _ = writeln!(out, "  Total Missed Days: {}", missed);
        let _ = writeln!(out, "  High-Score Employees: {}", high.len());
        for summary in high {
            let _ = writeln!(out, "    {}: {} points", summary.employee, summary.score);
        }
        out.push('\n');
    }

    heading(&mut out, "ANOMALY TYPE BREAKDOWN");
    let mut counts: Vec<(AnomalyKind, usize)> = result.kind_counts().into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    if counts.is_empty() {
        let _ = writeln!(out, "No anomalies detected.");
    }
    for (kind, count) in counts {
        let _ = writeln!(out, "{}: {}", kind.title(), count);
    }
    out.push('\n');

    heading(&mut out, "DATA QUALITY");
    if result.issues.is_empty() {
        let _ = writeln!(out, "No data quality issues.");
    }
    for issue in &result.issues {
        match &issue.employee {
            Some(employee) => {
                let _ = writeln!(
                    out,
                    "Row {} ({}), {}: {}",
                    issue.row, employee, issue.field, issue.message
                );
            }
            None => {
                let _ = writeln!(out, "Row {}, {}: {}", issue.row, issue.field, issue.message);
            }
        }
    }
    out.push('\n');

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "END OF REPORT");
    let _ = writeln!(out, "{}", rule);

    out
}
