//! Analysis period model.
//!
//! This module contains the [`Period`] type: a fixed two-week window that
//! anomalies and scores are grouped by.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// A half-open 14-day analysis window, `[start, end)`, starting on a Monday.
///
/// # Example
///
/// ```
/// use timeclock_analyzer::models::Period;
/// use chrono::NaiveDate;
///
/// let period = Period {
///     index: 0,
///     start: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
///     end: NaiveDate::from_ymd_opt(2024, 3, 18).unwrap(),
/// };
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2024, 3, 17).unwrap()));
/// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2024, 3, 18).unwrap()));
/// assert_eq!(period.label(), "03/04 - 03/17");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    /// Position of this period in the run, starting at zero.
    pub index: usize,
    /// First day of the period (inclusive, always a Monday).
    pub start: NaiveDate,
    /// First day after the period (exclusive).
    pub end: NaiveDate,
}

impl Period {
    /// Checks if a date falls within this period.
    ///
    /// The start date is included, the end date is not.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    /// The last day inside the period.
    pub fn last_day(&self) -> NaiveDate {
        self.end.pred_opt().unwrap_or(self.start)
    }

    /// Human-readable label, `MM/DD - MM/DD`, using inclusive bounds.
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.start.format("%m/%d"),
            self.last_day().format("%m/%d")
        )
    }

    /// Iterates over every date in the period, in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let mut next = Some(self.start);
        std::iter::from_fn(move || {
            let current = next.filter(|d| *d < self.end)?;
            next = current.checked_add_days(Days::new(1));
            Some(current)
        })
    }
}
