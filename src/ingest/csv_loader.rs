//! CSV loading for time clock exports.
//!
//! Validates the header, then parses each row into a [`PunchRecord`].
//! Rows that fail to parse are kept as [`RecordIssue`]s instead of aborting
//! the load.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{info, warn};

use crate::analysis::{parse_clock_time, parse_punch_date};
use crate::error::{EngineError, EngineResult, ParseError};
use crate::models::{PunchRecord, RecordIssue};

/// Columns every export must contain, in canonical spelling.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "DisplayAs",
    "InDate",
    "OutDate",
    "InTime",
    "OutTime",
    "InDow",
    "OutDow",
];

/// Records and rejected rows from one export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedPunches {
    /// Rows that parsed successfully, in file order.
    pub records: Vec<PunchRecord>,
    /// Rows that were rejected, in file order.
    pub issues: Vec<RecordIssue>,
}

/// Normalizes a header for case-insensitive, whitespace-tolerant matching.
fn normalize_header(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Maps each required column to its index, or lists the missing ones.
fn validate_headers(headers: &StringRecord) -> EngineResult<HashMap<&'static str, usize>> {
    let by_name: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| (normalize_header(header), idx))
        .collect();

    let mut columns = HashMap::new();
    let mut missing = Vec::new();
    for required in REQUIRED_COLUMNS {
        match by_name.get(&required.to_lowercase()) {
            Some(idx) => {
                columns.insert(required, *idx);
            }
            None => missing.push(required.to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(EngineError::MissingColumns { columns: missing });
    }

    Ok(columns)
}

struct RowReader<'a> {
    record: &'a StringRecord,
    columns: &'a HashMap<&'static str, usize>,
    row: usize,
    employee: Option<String>,
}

impl RowReader<'_> {
    fn field(&self, column: &'static str) -> &str {
        self.columns
            .get(column)
            .and_then(|idx| self.record.get(*idx))
            .unwrap_or("")
            .trim()
    }

    fn issue(&self, column: &str, error: ParseError) -> RecordIssue {
        RecordIssue {
            row: self.row,
            employee: self.employee.clone(),
            field: column.to_string(),
            message: error.to_string(),
        }
    }

    fn parse(mut self) -> Result<PunchRecord, RecordIssue> {
        let employee = self.field("DisplayAs").to_string();
        if employee.is_empty() {
            return Err(self.issue(
                "DisplayAs",
                ParseError::MissingField {
                    field: "DisplayAs".to_string(),
                },
            ));
        }
        self.employee = Some(employee.clone());

        let in_date = parse_punch_date(self.field("InDate"))
            .map_err(|e| self.issue("InDate", e))?
            .ok_or_else(|| {
                self.issue(
                    "InDate",
                    ParseError::MissingField {
                        field: "InDate".to_string(),
                    },
                )
            })?;
        let out_date =
            parse_punch_date(self.field("OutDate")).map_err(|e| self.issue("OutDate", e))?;
        let in_time =
            parse_clock_time(self.field("InTime")).map_err(|e| self.issue("InTime", e))?;
        let out_time =
            parse_clock_time(self.field("OutTime")).map_err(|e| self.issue("OutTime", e))?;

        if in_time.is_none() && out_time.is_none() {
            return Err(self.issue("InTime", ParseError::NoPunchTimes));
        }

        Ok(PunchRecord {
            row: self.row,
            employee,
            in_date,
            out_date,
            in_time,
            out_time,
            in_dow: self.field("InDow").to_string(),
            out_dow: self.field("OutDow").to_string(),
        })
    }
}

/// Loads punch records from CSV text.
///
/// # Errors
///
/// - [`EngineError::MissingColumns`] if any required column is absent.
/// - [`EngineError::CsvRead`] if the underlying stream fails.
///
/// Malformed rows are not errors; they are returned in
/// [`LoadedPunches::issues`].
///
/// # Example
///
/// ```
/// use timeclock_analyzer::ingest::load_punches;
///
/// let csv = "\
/// DisplayAs,InDate,OutDate,InTime,OutTime,InDow,OutDow
/// \"Santos, Clayton\",03/04/24,03/04/24,07:54a,12:01p,Mon,Mon
/// \"Santos, Clayton\",03/04/24,03/04/24,bad,04:30p,Mon,Mon
/// ";
///
/// let loaded = load_punches(csv.as_bytes()).unwrap();
/// assert_eq!(loaded.records.len(), 1);
/// assert_eq!(loaded.issues.len(), 1);
/// assert_eq!(loaded.issues[0].row, 2);
/// assert_eq!(loaded.issues[0].field, "InTime");
/// ```
pub fn load_punches<R: Read>(reader: R) -> EngineResult<LoadedPunches> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| EngineError::CsvRead {
            message: e.to_string(),
        })?
        .clone();
    let columns = validate_headers(&headers)?;

    let mut loaded = LoadedPunches::default();
    for (idx, result) in csv_reader.records().enumerate() {
        let row = idx + 1;
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => {
                return Err(EngineError::CsvRead {
                    message: e.to_string(),
                });
            }
            Err(e) => {
                warn!(row, error = %e, "Unreadable punch row");
                loaded.issues.push(RecordIssue {
                    row,
                    employee: None,
                    field: "row".to_string(),
                    message: e.to_string(),
                });
                continue;
            }
        };

        // Exports often end with a fully blank line.
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        let reader = RowReader {
            record: &record,
            columns: &columns,
            row,
            employee: None,
        };
        match reader.parse() {
            Ok(punch) => loaded.records.push(punch),
            Err(issue) => {
                warn!(
                    row = issue.row,
                    field = %issue.field,
                    error = %issue.message,
                    "Rejected punch row"
                );
                loaded.issues.push(issue);
            }
        }
    }

    info!(
        records = loaded.records.len(),
        rejected = loaded.issues.len(),
        "Loaded punch records"
    );

    Ok(loaded)
}

/// Loads punch records from a CSV file.
///
/// # Errors
///
/// Returns [`EngineError::Io`] if the file cannot be opened, plus any error
/// of [`load_punches`].
pub fn load_punches_from_path<P: AsRef<Path>>(path: P) -> EngineResult<LoadedPunches> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| EngineError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    load_punches(file)
}
