//! Anomaly classification rules.
//!
//! Compares resolved punches against the expected schedule and produces one
//! [`Anomaly`] per deviation. Every bound is inclusive: a punch exactly at
//! the expected time plus or minus the buffer is on time.
//!
//! | Rule | Kind | Severity |
//! |---|---|---|
//! | No punches on a workday while active in the period | missed day | 10 |
//! | Arrival after expected + buffer | late arrival | 5 |
//! | Lunch return after expected + buffer | late lunch return | 5 |
//! | One pair only, or a pair missing a punch | incomplete day | 5 |
//! | In-date differs from out-date | date mismatch | 5 |
//! | Lunch departure outside expected ± buffer | irregular lunch departure | 2 |
//! | End of day not within buffer of an end time | irregular end time | 2 |
//! | More than two pairs | extra punches | 2 |
//!
//! Each kind fires at most once per employee-day.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};

use crate::config::ScheduleConfig;
use crate::models::{Anomaly, AnomalyKind, DayPunches, Period, PunchRecord};

fn short_date(date: NaiveDate) -> String {
    date.format("%m/%d/%y").to_string()
}

fn out_date_text(record: &PunchRecord) -> String {
    record
        .out_date
        .map(short_date)
        .unwrap_or_else(|| "(blank)".to_string())
}

/// Classifies one employee-day against the schedule.
///
/// Anomalies are returned ordered by kind. Timing checks only look at the
/// morning and afternoon pairs; a missing timestamp skips the checks that
/// need it.
///
/// # Example
///
/// ```
/// use timeclock_analyzer::analysis::{classify_day, resolve_day};
/// use timeclock_analyzer::config::ScheduleConfig;
/// use timeclock_analyzer::models::{AnomalyKind, ClockTime, PunchRecord};
/// use chrono::NaiveDate;
///
/// let config = ScheduleConfig::default();
/// let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let at = |h, m| Some(ClockTime::at(h, m));
/// let records = vec![
///     PunchRecord::same_day(1, "A", date, at(8, 8), at(12, 0)),
///     PunchRecord::same_day(2, "A", date, at(12, 30), at(16, 30)),
/// ];
///
/// let day = resolve_day("A", date, 0, records, &config);
/// let anomalies = classify_day(&day, &config);
///
/// assert_eq!(anomalies.len(), 1);
/// assert_eq!(anomalies[0].kind, AnomalyKind::LateArrival);
/// assert_eq!(anomalies[0].severity, 5);
/// ```
pub fn classify_day(day: &DayPunches, config: &ScheduleConfig) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();
    let mut push = |kind: AnomalyKind, detail: String| {
        anomalies.push(Anomaly::new(
            day.employee.clone(),
            day.period_index,
            day.date,
            kind,
            detail,
        ));
    };

    let morning = day.morning();
    let afternoon = day.afternoon();

    if let Some(in_time) = morning
        .and_then(|r| r.in_time)
        .filter(|t| config.is_late(*t, config.morning_arrival))
    {
        push(
            AnomalyKind::LateArrival,
            format!(
                "Late arrival: {} ({} min late)",
                in_time,
                in_time.minutes() - config.morning_arrival.minutes()
            ),
        );
    }

    if let Some(in_time) = afternoon
        .and_then(|r| r.in_time)
        .filter(|t| config.is_late(*t, config.lunch_return))
    {
        push(
            AnomalyKind::LateLunchReturn,
            format!(
                "Late lunch return: {} ({} min late)",
                in_time,
                in_time.minutes() - config.lunch_return.minutes()
            ),
        );
    }

    if day.pair_count() == 1 {
        push(
            AnomalyKind::IncompleteDay,
            format!("Only one punch pair on {}", short_date(day.date)),
        );
    } else {
        let partial: Vec<&str> = [("morning", morning), ("afternoon", afternoon)]
            .into_iter()
            .filter(|(_, record)| record.is_some_and(|r| !r.is_complete()))
            .map(|(name, _)| name)
            .collect();
        if !partial.is_empty() {
            push(
                AnomalyKind::IncompleteDay,
                format!("Missing punch in {} pair", partial.join(" and ")),
            );
        }
    }

    let mismatched: Vec<&PunchRecord> = day.records().filter(|r| r.has_date_mismatch()).collect();
    if let Some(first) = mismatched.first() {
        let mut detail = format!(
            "Punch dates don't match: {} vs {}",
            short_date(first.in_date),
            out_date_text(first)
        );
        if mismatched.len() > 1 {
            detail.push_str(&format!(" ({} records)", mismatched.len()));
        }
        push(AnomalyKind::DateMismatch, detail);
    }

    if let Some(out_time) = morning
        .and_then(|r| r.out_time)
        .filter(|t| !config.within_buffer(*t, config.lunch_departure))
    {
        push(
            AnomalyKind::IrregularLunchDeparture,
            format!("Irregular lunch departure: {}", out_time),
        );
    }

    if let Some(out_time) = afternoon
        .and_then(|r| r.out_time)
        .filter(|t| config.end_time_deviation(*t) > config.buffer_minutes)
    {
        push(
            AnomalyKind::IrregularEndTime,
            format!("Irregular end time: {}", out_time),
        );
    }

    let extra = day.extras().count();
    if extra > 0 {
        push(
            AnomalyKind::ExtraPunches,
            format!("Extra punch pairs ({}) indicating additional breaks", extra),
        );
    }

    anomalies.sort_by_key(|a| a.kind);
    anomalies
}

/// Infers missed days for every employee active in a period.
///
/// An employee is active in the period when they have at least one resolved
/// day in it. Each configured workday of the period with no punches for that
/// employee yields one [`AnomalyKind::MissedDay`], including workdays past
/// the last date in the export.
///
/// `days` may contain days from other periods; they are ignored.
pub fn find_missed_days(
    period: &Period,
    days: &[DayPunches],
    config: &ScheduleConfig,
) -> Vec<Anomaly> {
    let mut worked: BTreeMap<&str, BTreeSet<NaiveDate>> = BTreeMap::new();
    for day in days.iter().filter(|d| d.period_index == period.index) {
        worked
            .entry(day.employee.as_str())
            .or_default()
            .insert(day.date);
    }

    let expected: Vec<NaiveDate> = period
        .dates()
        .filter(|d| config.is_workday(d.weekday()))
        .collect();

    worked
        .into_iter()
        .flat_map(|(employee, dates)| {
            expected
                .iter()
                .filter(move |d| !dates.contains(*d))
                .map(move |d| {
                    Anomaly::new(
                        employee,
                        period.index,
                        *d,
                        AnomalyKind::MissedDay,
                        format!("Missed entire work day on {}", short_date(*d)),
                    )
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::resolve_day;
    use crate::models::ClockTime;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn t(h: u16, m: u16) -> Option<ClockTime> {
        Some(ClockTime::at(h, m))
    }

    fn punch(row: usize, start: Option<ClockTime>, end: Option<ClockTime>) -> PunchRecord {
        PunchRecord::same_day(row, "Santos, Clayton", make_date("2024-03-04"), start, end)
    }

    fn standard_day(arrival: Option<ClockTime>) -> Vec<PunchRecord> {
        vec![
            punch(1, arrival, t(12, 0)),
            punch(2, t(12, 30), t(16, 30)),
        ]
    }

    fn classify(records: Vec<PunchRecord>) -> Vec<Anomaly> {
        let config = ScheduleConfig::default();
        let day = resolve_day(
            "Santos, Clayton",
            make_date("2024-03-04"),
            0,
            records,
            &config,
        );
        classify_day(&day, &config)
    }

    fn kinds(anomalies: &[Anomaly]) -> Vec<AnomalyKind> {
        anomalies.iter().map(|a| a.kind).collect()
    }

    // ==========================================================================
    // AC-001: on-time day produces nothing
    // ==========================================================================
    #[test]
    fn test_ac_001_on_time_day() {
        assert!(classify(standard_day(t(7, 58))).is_empty());
    }

    // ==========================================================================
    // AC-002: late arrival boundary is inclusive
    // ==========================================================================
    #[test]
    fn test_ac_002_arrival_at_buffer_is_on_time() {
        assert!(classify(standard_day(t(8, 7))).is_empty());
    }

    #[test]
    fn test_ac_002_arrival_past_buffer_is_late() {
        let anomalies = classify(standard_day(t(8, 8)));
        assert_eq!(kinds(&anomalies), vec![AnomalyKind::LateArrival]);
        assert_eq!(anomalies[0].severity, 5);
        assert_eq!(anomalies[0].detail, "Late arrival: 08:08a (8 min late)");
    }

    #[test]
    fn test_early_arrival_is_not_an_anomaly() {
        assert!(classify(standard_day(t(7, 30))).is_empty());
    }

    // ==========================================================================
    // AC-003: lunch departure window is symmetric
    // ==========================================================================
    #[test]
    fn test_ac_003_lunch_departure_window() {
        for (out, expected) in [
            ((11, 53), vec![]),
            ((12, 7), vec![]),
            ((11, 52), vec![AnomalyKind::IrregularLunchDeparture]),
            ((12, 8), vec![AnomalyKind::IrregularLunchDeparture]),
        ] {
            let records = vec![
                punch(1, t(8, 0), t(out.0, out.1)),
                punch(2, t(12, 30), t(16, 30)),
            ];
            assert_eq!(kinds(&classify(records)), expected, "out at {:?}", out);
        }
    }

    // ==========================================================================
    // AC-004: late lunch return
    // ==========================================================================
    #[test]
    fn test_ac_004_late_lunch_return() {
        let records = vec![punch(1, t(8, 0), t(12, 0)), punch(2, t(12, 38), t(16, 30))];
        let anomalies = classify(records);
        assert_eq!(kinds(&anomalies), vec![AnomalyKind::LateLunchReturn]);
        assert_eq!(anomalies[0].detail, "Late lunch return: 12:38p (8 min late)");
    }

    #[test]
    fn test_lunch_return_at_buffer_is_on_time() {
        let records = vec![punch(1, t(8, 0), t(12, 0)), punch(2, t(12, 37), t(16, 30))];
        assert!(classify(records).is_empty());
    }

    // ==========================================================================
    // AC-005: end time near either acceptable end
    // ==========================================================================
    #[test]
    fn test_ac_005_end_time_windows() {
        for (end, irregular) in [
            ((15, 53), false),
            ((16, 7), false),
            ((16, 15), true),
            ((16, 23), false),
            ((16, 37), false),
            ((16, 38), true),
            ((15, 52), true),
        ] {
            let records = vec![punch(1, t(8, 0), t(12, 0)), punch(2, t(12, 30), t(end.0, end.1))];
            let found = kinds(&classify(records)).contains(&AnomalyKind::IrregularEndTime);
            assert_eq!(found, irregular, "end at {:?}", end);
        }
    }

    // ==========================================================================
    // AC-006: single pair is an incomplete day
    // ==========================================================================
    #[test]
    fn test_ac_006_single_pair() {
        let anomalies = classify(vec![punch(1, t(8, 0), t(12, 0))]);
        assert_eq!(kinds(&anomalies), vec![AnomalyKind::IncompleteDay]);
        assert_eq!(anomalies[0].detail, "Only one punch pair on 03/04/24");
    }

    #[test]
    fn test_single_late_morning_pair_still_checks_arrival() {
        let anomalies = classify(vec![punch(1, t(8, 20), t(12, 0))]);
        assert_eq!(
            kinds(&anomalies),
            vec![AnomalyKind::LateArrival, AnomalyKind::IncompleteDay]
        );
    }

    // ==========================================================================
    // AC-007: a missing timestamp only yields incomplete day
    // ==========================================================================
    #[test]
    fn test_ac_007_missing_out_punch() {
        let records = vec![punch(1, t(8, 0), t(12, 0)), punch(2, t(12, 30), None)];
        let anomalies = classify(records);
        assert_eq!(kinds(&anomalies), vec![AnomalyKind::IncompleteDay]);
        assert_eq!(anomalies[0].detail, "Missing punch in afternoon pair");
    }

    #[test]
    fn test_missing_in_punch_skips_arrival_check() {
        let records = vec![punch(1, None, t(12, 0)), punch(2, t(12, 30), t(16, 30))];
        assert_eq!(kinds(&classify(records)), vec![AnomalyKind::IncompleteDay]);
    }

    // ==========================================================================
    // AC-008: extra punches flagged once, first two still classified
    // ==========================================================================
    #[test]
    fn test_ac_008_extra_punches() {
        let records = vec![
            punch(1, t(8, 15), t(12, 0)),
            punch(2, t(12, 30), t(14, 0)),
            punch(3, t(14, 15), t(16, 30)),
        ];
        let anomalies = classify(records);

        assert_eq!(
            kinds(&anomalies),
            vec![
                AnomalyKind::LateArrival,
                AnomalyKind::IrregularEndTime,
                AnomalyKind::ExtraPunches
            ]
        );
        let extra = anomalies.last().unwrap();
        assert_eq!(extra.severity, 2);
        assert_eq!(extra.detail, "Extra punch pairs (1) indicating additional breaks");
    }

    // ==========================================================================
    // AC-009: date mismatch independent of timing
    // ==========================================================================
    #[test]
    fn test_ac_009_date_mismatch() {
        let records = vec![
            punch(1, t(8, 0), t(12, 0)),
            punch(2, t(12, 30), t(16, 30)).with_out_date(make_date("2024-03-05")),
        ];
        let anomalies = classify(records);
        assert_eq!(kinds(&anomalies), vec![AnomalyKind::DateMismatch]);
        assert_eq!(anomalies[0].severity, 5);
        assert_eq!(
            anomalies[0].detail,
            "Punch dates don't match: 03/04/24 vs 03/05/24"
        );
    }

    #[test]
    fn test_blank_out_date_is_a_mismatch() {
        let mut afternoon = punch(2, t(12, 30), t(16, 30));
        afternoon.out_date = None;
        let anomalies = classify(vec![punch(1, t(8, 0), t(12, 0)), afternoon]);

        assert_eq!(kinds(&anomalies), vec![AnomalyKind::DateMismatch]);
        assert_eq!(
            anomalies[0].detail,
            "Punch dates don't match: 03/04/24 vs (blank)"
        );
    }

    #[test]
    fn test_multiple_kinds_fire_independently() {
        let records = vec![
            punch(1, t(8, 30), t(11, 30)),
            punch(2, t(13, 0), t(17, 30)).with_out_date(make_date("2024-03-05")),
        ];
        let anomalies = classify(records);
        assert_eq!(
            kinds(&anomalies),
            vec![
                AnomalyKind::LateArrival,
                AnomalyKind::LateLunchReturn,
                AnomalyKind::DateMismatch,
                AnomalyKind::IrregularLunchDeparture,
                AnomalyKind::IrregularEndTime,
            ]
        );
        let score: u32 = anomalies.iter().map(|a| a.severity).sum();
        assert_eq!(score, 5 + 5 + 5 + 2 + 2);
    }

    // ==========================================================================
    // MD-001: missed days relative to the employee's own activity
    // ==========================================================================
    fn period() -> Period {
        Period {
            index: 0,
            start: make_date("2024-03-04"),
            end: make_date("2024-03-18"),
        }
    }

    fn worked_day(employee: &str, date: &str) -> DayPunches {
        let config = ScheduleConfig::default();
        let record = PunchRecord::same_day(1, employee, make_date(date), t(8, 0), t(12, 0));
        resolve_day(employee, make_date(date), 0, vec![record], &config)
    }

    #[test]
    fn test_md_001_missed_weekday() {
        let days = vec![
            worked_day("Santos, Clayton", "2024-03-04"),
            worked_day("Santos, Clayton", "2024-03-06"),
        ];
        let missed = find_missed_days(&period(), &days, &ScheduleConfig::default());

        assert_eq!(missed.len(), 8);
        assert!(missed.iter().all(|a| a.kind == AnomalyKind::MissedDay));
        assert_eq!(missed[0].date, make_date("2024-03-05"));
        assert_eq!(missed[0].severity, 10);
        assert_eq!(missed[0].detail, "Missed entire work day on 03/05/24");
    }

    #[test]
    fn test_whole_period_is_expected() {
        // Working Wed to Fri of week one leaves seven workdays missed
        let days = vec![
            worked_day("Santos, Clayton", "2024-03-06"),
            worked_day("Santos, Clayton", "2024-03-07"),
            worked_day("Santos, Clayton", "2024-03-08"),
        ];

        let missed = find_missed_days(&period(), &days, &ScheduleConfig::default());

        let dates: Vec<NaiveDate> = missed.iter().map(|a| a.date).collect();
        assert_eq!(
            dates,
            vec![
                make_date("2024-03-04"),
                make_date("2024-03-05"),
                make_date("2024-03-11"),
                make_date("2024-03-12"),
                make_date("2024-03-13"),
                make_date("2024-03-14"),
                make_date("2024-03-15"),
            ]
        );
    }

    #[test]
    fn test_weekends_are_not_missed() {
        let days = vec![worked_day("A", "2024-03-09")];

        let missed = find_missed_days(&period(), &days, &ScheduleConfig::default());

        assert_eq!(missed.len(), 10);
        assert!(missed.iter().all(|a| a.date.weekday().number_from_monday() <= 5));
    }

    #[test]
    fn test_days_from_other_periods_are_ignored() {
        let config = ScheduleConfig::default();
        let record = PunchRecord::same_day(1, "A", make_date("2024-03-18"), t(8, 0), t(12, 0));
        let days = vec![resolve_day("A", make_date("2024-03-18"), 1, vec![record], &config)];

        assert!(find_missed_days(&period(), &days, &config).is_empty());
    }

    #[test]
    fn test_every_unworked_workday_is_missed() {
        let days = vec![worked_day("A", "2024-03-04")];

        let missed = find_missed_days(&period(), &days, &ScheduleConfig::default());

        assert!(missed.iter().all(|a| a.employee == "A"));
        assert_eq!(missed.len(), 9);
    }
}
