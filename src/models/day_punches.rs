//! Resolved punches for one employee on one day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::PunchRecord;

/// The position a punch pair occupies in the expected daily schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftSlot {
    /// Arrival through lunch departure.
    Morning,
    /// Lunch return through end of day.
    Afternoon,
    /// Any pair beyond the first two; excluded from timing checks.
    Extra,
}

/// A punch record placed in a schedule slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchPair {
    /// The slot this pair was resolved into.
    pub slot: ShiftSlot,
    /// The underlying record.
    pub record: PunchRecord,
}

/// Every punch pair found for one employee on one date.
///
/// Pairs are stored in slot order: morning, afternoon, then extras in time
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPunches {
    /// Employee display name.
    pub employee: String,
    /// The calendar date (the records' in-date).
    pub date: NaiveDate,
    /// Index of the period containing the date.
    pub period_index: usize,
    /// The resolved pairs.
    pub pairs: Vec<PunchPair>,
}

impl DayPunches {
    fn slot(&self, slot: ShiftSlot) -> Option<&PunchRecord> {
        self.pairs
            .iter()
            .find(|p| p.slot == slot)
            .map(|p| &p.record)
    }

    /// The morning pair, if one was resolved.
    pub fn morning(&self) -> Option<&PunchRecord> {
        self.slot(ShiftSlot::Morning)
    }

    /// The afternoon pair, if one was resolved.
    pub fn afternoon(&self) -> Option<&PunchRecord> {
        self.slot(ShiftSlot::Afternoon)
    }

    /// Pairs beyond the expected two.
    pub fn extras(&self) -> impl Iterator<Item = &PunchRecord> {
        self.pairs
            .iter()
            .filter(|p| p.slot == ShiftSlot::Extra)
            .map(|p| &p.record)
    }

    /// Every record of the day, in slot order.
    pub fn records(&self) -> impl Iterator<Item = &PunchRecord> {
        self.pairs.iter().map(|p| &p.record)
    }

    /// Number of punch pairs recorded on the day.
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// Total minutes worked across every complete pair.
    pub fn worked_minutes(&self) -> u32 {
        self.records()
            .filter_map(PunchRecord::worked_minutes)
            .map(u32::from)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClockTime;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn record(row: usize, start: (u16, u16), end: (u16, u16)) -> PunchRecord {
        PunchRecord::same_day(
            row,
            "Santos, Clayton",
            make_date("2024-03-04"),
            Some(ClockTime::at(start.0, start.1)),
            Some(ClockTime::at(end.0, end.1)),
        )
    }

    fn sample_day() -> DayPunches {
        DayPunches {
            employee: "Santos, Clayton".to_string(),
            date: make_date("2024-03-04"),
            period_index: 0,
            pairs: vec![
                PunchPair {
                    slot: ShiftSlot::Morning,
                    record: record(1, (8, 0), (12, 0)),
                },
                PunchPair {
                    slot: ShiftSlot::Afternoon,
                    record: record(2, (12, 30), (16, 30)),
                },
                PunchPair {
                    slot: ShiftSlot::Extra,
                    record: record(3, (17, 0), (17, 15)),
                },
            ],
        }
    }

    #[test]
    fn test_slot_accessors() {
        let day = sample_day();
        assert_eq!(day.morning().map(|r| r.row), Some(1));
        assert_eq!(day.afternoon().map(|r| r.row), Some(2));
        assert_eq!(day.extras().count(), 1);
        assert_eq!(day.pair_count(), 3);
    }

    #[test]
    fn test_worked_minutes_sums_all_pairs() {
        // 240 + 240 + 15
        assert_eq!(sample_day().worked_minutes(), 495);
    }

    #[test]
    fn test_missing_slots() {
        let day = DayPunches {
            employee: "A".to_string(),
            date: make_date("2024-03-04"),
            period_index: 0,
            pairs: vec![],
        };
        assert!(day.morning().is_none());
        assert!(day.afternoon().is_none());
        assert_eq!(day.worked_minutes(), 0);
    }
}
