//! Core data models for the Time Clock Analyzer.
//!
//! This module contains all the domain models used throughout the engine.

mod anomaly;
mod clock_time;
mod day_punches;
mod period;
mod punch;
mod summary;

pub use anomaly::{Anomaly, AnomalyKind, Severity};
pub use clock_time::ClockTime;
pub use day_punches::{DayPunches, PunchPair, ShiftSlot};
pub use period::Period;
pub use punch::PunchRecord;
pub use summary::{AnalysisResult, EmployeePeriodSummary, EmployeeRanking, RecordIssue};
