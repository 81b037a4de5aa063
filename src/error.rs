//! Error types for the Time Clock Analyzer.
//!
//! Fatal conditions that abort a run are represented by [`EngineError`].
//! Per-field failures while reading a single punch row are represented by
//! [`ParseError`]; those are collected as data-quality issues instead of
//! being raised.

use thiserror::Error;

/// The main error type for the Time Clock Analyzer.
///
/// Every variant is fatal: a run that hits one of these produces no report.
///
/// # Example
///
/// ```
/// use timeclock_analyzer::error::EngineError;
///
/// let error = EngineError::MissingColumns {
///     columns: vec!["InTime".to_string(), "OutTime".to_string()],
/// };
/// assert_eq!(error.to_string(), "Missing required columns: InTime, OutTime");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but describes an impossible schedule.
    #[error("Invalid schedule configuration: {message}")]
    InvalidConfig {
        /// A description of what made the schedule invalid.
        message: String,
    },

    /// One or more required columns are absent from the punch export.
    #[error("Missing required columns: {}", columns.join(", "))]
    MissingColumns {
        /// The names of the missing columns, in canonical order.
        columns: Vec<String>,
    },

    /// No valid punch records remain after parsing.
    #[error("No valid punch records remain after parsing ({rejected} rows rejected)")]
    EmptyDataset {
        /// Number of rows that were rejected during parsing.
        rejected: usize,
    },

    /// The CSV stream itself could not be read.
    #[error("Failed to read punch data: {message}")]
    CsvRead {
        /// A description of the read failure.
        message: String,
    },

    /// An analysis output could not be serialized.
    #[error("Failed to serialize output: {message}")]
    Serialize {
        /// A description of the serialization failure.
        message: String,
    },

    /// An input or output file could not be accessed.
    #[error("I/O error on '{path}': {message}")]
    Io {
        /// The path involved.
        path: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

/// A failure to parse a single field of a punch record.
///
/// These never abort a run; the loader records them against the row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The time was not in `HH:MMa` / `HH:MMp` form.
    #[error("Invalid time '{value}': expected HH:MM followed by 'a' or 'p'")]
    InvalidTime {
        /// The offending value.
        value: String,
    },

    /// The time had the right shape but an impossible hour or minute.
    #[error("Time out of range '{value}': hour must be 1-12 and minute 0-59")]
    TimeOutOfRange {
        /// The offending value.
        value: String,
    },

    /// The date was not in `MM/DD/YY` form.
    #[error("Invalid date '{value}': expected MM/DD/YY")]
    InvalidDate {
        /// The offending value.
        value: String,
    },

    /// A required field was empty.
    #[error("Missing value for {field}")]
    MissingField {
        /// The name of the empty field.
        field: String,
    },

    /// Neither the in-time nor the out-time of the record was present.
    #[error("Record has neither an in-time nor an out-time")]
    NoPunchTimes,
}
