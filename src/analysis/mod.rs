//! Anomaly analysis for time clock punches.
//!
//! This module contains the stages of an analysis run:
//! - Time and date parsing
//! - Two-week period partitioning
//! - Punch pair resolution
//! - Anomaly classification
//! - Score aggregation and ranking
//!
//! [`analyze`] runs every stage in order.

mod aggregator;
mod classifier;
mod pair_resolver;
mod period_partition;
mod pipeline;
mod time_parser;

pub use aggregator::{rank_employees, summarize, HIGH_SCORE_THRESHOLD};
pub use classifier::{classify_day, find_missed_days};
pub use pair_resolver::{resolve_day, resolve_period};
pub use period_partition::{
    build_periods, partition_by_period, period_anchor, period_index_for, PeriodPartition,
    PERIOD_LENGTH_DAYS,
};
pub use pipeline::{analyze, analyze_csv};
pub use time_parser::{format_clock_time, parse_clock_time, parse_punch_date, PUNCH_DATE_FORMAT};
