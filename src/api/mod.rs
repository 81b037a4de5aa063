//! HTTP API module for the Time Clock Analyzer.
//!
//! This module provides endpoints that accept a raw CSV punch export and
//! return either the full analysis as JSON or the text report.

mod handlers;
mod response;
mod state;

pub use handlers::create_router;
pub use response::{AnalysisResponse, ApiError, ApiErrorResponse};
pub use state::AppState;
