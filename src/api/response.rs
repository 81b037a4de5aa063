//! Response types for the Time Clock Analyzer API.
//!
//! This module defines the success envelope and the error response
//! structures for the HTTP API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::AnalysisResult;

/// Successful response from `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// Identifier for this analysis, also used as the log correlation id.
    pub analysis_id: Uuid,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// The analysis itself.
    pub result: AnalysisResult,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates an error for a request body that is not UTF-8 text.
    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::new("INVALID_BODY", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::MissingColumns { columns } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "MISSING_COLUMNS",
                    message,
                    format!("Expected columns include: {}", columns.join(", ")),
                ),
            },
            EngineError::EmptyDataset { rejected } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "EMPTY_DATASET",
                    message,
                    format!("{} rows were rejected during parsing", rejected),
                ),
            },
            EngineError::CsvRead { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("CSV_READ_ERROR", message),
            },
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::Io { .. } | EngineError::Serialize { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("INTERNAL_ERROR", "Internal error", message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_missing_columns_is_bad_request() {
        let response: ApiErrorResponse = EngineError::MissingColumns {
            columns: vec!["InDow".to_string()],
        }
        .into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "MISSING_COLUMNS");
        assert_eq!(response.error.message, "Missing required columns: InDow");
    }

    #[test]
    fn test_empty_dataset_is_bad_request() {
        let response: ApiErrorResponse = EngineError::EmptyDataset { rejected: 3 }.into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "EMPTY_DATASET");
    }

    #[test]
    fn test_config_error_is_internal() {
        let response: ApiErrorResponse = EngineError::InvalidConfig {
            message: "buffer too large".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.code, "CONFIG_ERROR");
    }

    #[test]
    fn test_serialize_error_is_internal() {
        let response: ApiErrorResponse = EngineError::Serialize {
            message: "key must be a string".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.code, "INTERNAL_ERROR");
    }
}
