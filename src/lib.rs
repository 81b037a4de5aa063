//! Time Clock Analyzer
//!
//! This crate scores employee time clock punch exports against an expected
//! daily schedule. Punches are grouped into two-week periods, resolved into
//! morning and afternoon pairs, checked for attendance anomalies, and ranked
//! by weighted anomaly score.

#![warn(missing_docs)]

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod report;
