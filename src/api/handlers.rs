//! HTTP request handlers for the Time Clock Analyzer API.
//!
//! Both endpoints take the raw CSV export as the request body.

use std::time::Instant;

use axum::{
    extract::{rejection::StringRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::analyze_csv;
use crate::models::AnalysisResult;
use crate::report::render_report;

use super::response::{AnalysisResponse, ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze_handler))
        .route("/report", post(report_handler))
        .with_state(state)
}

/// Analyzes a request body, or builds the error response to send instead.
fn run_analysis(
    correlation_id: Uuid,
    state: &AppState,
    payload: Result<String, StringRejection>,
) -> Result<AnalysisResult, Response> {
    let body = payload.map_err(|rejection| {
        warn!(
            correlation_id = %correlation_id,
            error = %rejection,
            "Unreadable request body"
        );
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::invalid_body(rejection.body_text())),
        )
            .into_response()
    })?;

    let start_time = Instant::now();
    match analyze_csv(body.as_bytes(), state.config()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                records = result.records_analyzed,
                rejected = result.issues.len(),
                anomalies = result.anomalies.len(),
                duration_us = start_time.elapsed().as_micros() as u64,
                "Analysis completed successfully"
            );
            Ok(result)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Analysis failed"
            );
            let api_error: ApiErrorResponse = err.into();
            Err(api_error.into_response())
        }
    }
}

/// Handler for POST /analyze.
///
/// Returns the full analysis wrapped in an [`AnalysisResponse`].
async fn analyze_handler(
    State(state): State<AppState>,
    payload: Result<String, StringRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing analysis request");

    match run_analysis(correlation_id, &state, payload) {
        Ok(result) => (
            StatusCode::OK,
            Json(AnalysisResponse {
                analysis_id: correlation_id,
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                result,
            }),
        )
            .into_response(),
        Err(response) => response,
    }
}

/// Handler for POST /report.
///
/// Returns the plain-text management report.
async fn report_handler(
    State(state): State<AppState>,
    payload: Result<String, StringRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing report request");

    match run_analysis(correlation_id, &state, payload) {
        Ok(result) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            render_report(&result),
        )
            .into_response(),
        Err(response) => response,
    }
}
