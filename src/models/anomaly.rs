//! Anomaly models.
//!
//! An [`Anomaly`] is a single scored deviation from the expected schedule.
//! The set of [`AnomalyKind`]s is closed; each kind carries a fixed
//! [`Severity`].

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Severity band of an anomaly.
///
/// # Example
///
/// ```
/// use timeclock_analyzer::models::Severity;
///
/// assert_eq!(Severity::High.weight(), 10);
/// assert_eq!(Severity::Medium.weight(), 5);
/// assert_eq!(Severity::Low.weight(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Weight 10.
    High,
    /// Weight 5.
    Medium,
    /// Weight 2.
    Low,
}

impl Severity {
    /// The score contributed by one anomaly of this severity.
    pub fn weight(self) -> u32 {
        match self {
            Severity::High => 10,
            Severity::Medium => 5,
            Severity::Low => 2,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
            Severity::Low => write!(f, "low"),
        }
    }
}

/// The kind of attendance deviation detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    /// No punches on a workday while active elsewhere in the period.
    MissedDay,
    /// Morning arrival after the expected arrival plus buffer.
    LateArrival,
    /// Lunch return after the expected return plus buffer.
    LateLunchReturn,
    /// Only one pair where two were expected, or a pair missing a punch.
    IncompleteDay,
    /// In-date and out-date of a record differ.
    DateMismatch,
    /// Lunch departure outside the buffer window.
    IrregularLunchDeparture,
    /// End of day not within the buffer of any acceptable end time.
    IrregularEndTime,
    /// More than two punch pairs on the day.
    ExtraPunches,
}

impl AnomalyKind {
    /// Every kind, in declaration order.
    pub const ALL: [AnomalyKind; 8] = [
        AnomalyKind::MissedDay,
        AnomalyKind::LateArrival,
        AnomalyKind::LateLunchReturn,
        AnomalyKind::IncompleteDay,
        AnomalyKind::DateMismatch,
        AnomalyKind::IrregularLunchDeparture,
        AnomalyKind::IrregularEndTime,
        AnomalyKind::ExtraPunches,
    ];

    /// The fixed severity of this kind.
    pub fn severity(self) -> Severity {
        match self {
            AnomalyKind::MissedDay => Severity::High,
            AnomalyKind::LateArrival
            | AnomalyKind::LateLunchReturn
            | AnomalyKind::IncompleteDay
            | AnomalyKind::DateMismatch => Severity::Medium,
            AnomalyKind::IrregularLunchDeparture
            | AnomalyKind::IrregularEndTime
            | AnomalyKind::ExtraPunches => Severity::Low,
        }
    }

    /// Returns true for kinds derived from recorded punches.
    ///
    /// Only [`AnomalyKind::MissedDay`] is inferred from the absence of punches.
    pub fn is_punch_based(self) -> bool {
        self != AnomalyKind::MissedDay
    }

    /// Title-cased name used in reports.
    pub fn title(self) -> &'static str {
        match self {
            AnomalyKind::MissedDay => "Missed Day",
            AnomalyKind::LateArrival => "Late Arrival",
            AnomalyKind::LateLunchReturn => "Late Lunch Return",
            AnomalyKind::IncompleteDay => "Incomplete Day",
            AnomalyKind::DateMismatch => "Date Mismatch",
            AnomalyKind::IrregularLunchDeparture => "Irregular Lunch Departure",
            AnomalyKind::IrregularEndTime => "Irregular End Time",
            AnomalyKind::ExtraPunches => "Extra Punches",
        }
    }
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A single scored deviation for one employee on one date.
///
/// # Example
///
/// ```
/// use timeclock_analyzer::models::{Anomaly, AnomalyKind};
/// use chrono::NaiveDate;
///
/// let anomaly = Anomaly::new(
///     "Santos, Clayton",
///     0,
///     NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
///     AnomalyKind::LateArrival,
///     "Late arrival: 08:08a (8 min late)",
/// );
/// assert_eq!(anomaly.severity, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anomaly {
    /// Employee display name.
    pub employee: String,
    /// Index of the period the date falls in.
    pub period_index: usize,
    /// The date the anomaly applies to.
    pub date: NaiveDate,
    /// What was detected.
    pub kind: AnomalyKind,
    /// Severity weight, always `kind.severity().weight()`.
    pub severity: u32,
    /// Human-readable description for reviewers.
    pub detail: String,
}

impl Anomaly {
    /// Creates an anomaly, deriving its weight from the kind.
    pub fn new(
        employee: impl Into<String>,
        period_index: usize,
        date: NaiveDate,
        kind: AnomalyKind,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            employee: employee.into(),
            period_index,
            date,
            kind,
            severity: kind.severity().weight(),
            detail: detail.into(),
        }
    }
}
