//! Loading punch records from time clock exports.

mod csv_loader;

pub use csv_loader::{load_punches, load_punches_from_path, LoadedPunches, REQUIRED_COLUMNS};
