// Error handling module for the Discount Rules API
// Provides centralized error types and HTTP response conversion

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::store::StoreError;

/// Main error type for the API
/// All handlers should return Result<T, ApiError>
///
/// Write-side validation is strict (400-level variants), while read-side
/// corruption never produces an error at all: malformed stored collections
/// are normalized to empty lists before a handler ever sees them.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Submitted discount payload was empty or absent
    /// Maps to HTTP 400 Bad Request
    #[error("No data received.")]
    MissingData,

    /// Submitted discount payload was not an object/mapping
    /// Maps to HTTP 400 Bad Request
    #[error("Invalid data format.")]
    InvalidData,

    /// The option store reported that the collection write did not persist
    /// Maps to HTTP 500 Internal Server Error
    #[error("Failed to save data.")]
    PersistFailed,

    /// Option store access errors
    /// Maps to HTTP 500 Internal Server Error
    /// Sensitive details are filtered from client responses
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Internal server errors
    /// Maps to HTTP 500 Internal Server Error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Consistent error response structure
///
/// JSON format shared by every error the API returns: a machine-readable
/// `error_code`, a human-readable `message`, and the moment it happened.
#[derive(Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g. "MISSING_DATA", "PERSIST_FAILED")
    pub error_code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details
    /// Omitted from JSON when None
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,

    /// ISO 8601 timestamp of when the error occurred
    pub timestamp: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = self.to_error_response();
        (status, Json(error_response)).into_response()
    }
}

impl ApiError {
    /// Convert ApiError to HTTP status code and ErrorResponse
    ///
    /// Expected client errors are logged at debug level; store failures are
    /// logged at error level and their details withheld from the client.
    fn to_error_response(&self) -> (StatusCode, ErrorResponse) {
        match self {
            ApiError::MissingData => {
                debug!("Rejected empty discount submission");

                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error_code: "MISSING_DATA".to_string(),
                        message: "No data received.".to_string(),
                        details: None,
                        timestamp: Utc::now().to_rfc3339(),
                    },
                )
            }
            ApiError::InvalidData => {
                debug!("Rejected non-object discount submission");

                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error_code: "INVALID_DATA".to_string(),
                        message: "Invalid data format.".to_string(),
                        details: None,
                        timestamp: Utc::now().to_rfc3339(),
                    },
                )
            }
            ApiError::PersistFailed => {
                error!("Option store reported a failed collection write");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error_code: "PERSIST_FAILED".to_string(),
                        message: "Failed to save data.".to_string(),
                        details: None,
                        timestamp: Utc::now().to_rfc3339(),
                    },
                )
            }
            ApiError::Store(store_error) => {
                // Log the full store error internally, return a generic message
                error!("Store error: {:?}", store_error);

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error_code: "STORE_ERROR".to_string(),
                        message: "A storage error occurred".to_string(),
                        details: None,
                        timestamp: Utc::now().to_rfc3339(),
                    },
                )
            }
            ApiError::Internal(internal_msg) => {
                error!("Internal error: {}", internal_msg);

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error_code: "INTERNAL_ERROR".to_string(),
                        message: "An internal server error occurred".to_string(),
                        details: None,
                        timestamp: Utc::now().to_rfc3339(),
                    },
                )
            }
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingData | ApiError::InvalidData => StatusCode::BAD_REQUEST,
            ApiError::PersistFailed | ApiError::Store(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
