//! Response types for the payroll API.
//!
//! This module defines the success envelopes and the JSON error body, and
//! maps each [`EngineError`] to an HTTP status.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{AuditTrace, FamilyStatus, PayrollResult, TaxBracket};
use crate::repository::UpsertOutcome;

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

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Pairs an error body with a status.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
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
            EngineError::ConfigNotFound { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::ConfigParseError { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration parse error", message),
            ),
            EngineError::InvalidTaxSchedule { message: reason } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details("INVALID_TAX_SCHEDULE", message, reason),
            ),
            EngineError::InvalidPayrollInput { field, .. } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details("INVALID_PAYROLL_INPUT", message, field),
            ),
            EngineError::EmployeeNotFound { .. } => Self::new(
                StatusCode::NOT_FOUND,
                ApiError::new("EMPLOYEE_NOT_FOUND", message),
            ),
            EngineError::PeriodNotFound { .. } => Self::new(
                StatusCode::NOT_FOUND,
                ApiError::new("PERIOD_NOT_FOUND", message),
            ),
            EngineError::PeriodFinalized { .. } => Self::new(
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "PERIOD_FINALIZED",
                    message,
                    "Finalized periods cannot be recalculated",
                ),
            ),
            EngineError::StorageError { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("STORAGE_ERROR", message),
            ),
        }
    }
}

/// Response body of `POST /payroll/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollCalculationResponse {
    /// Unique identifier of this calculation.
    pub calculation_id: Uuid,
    /// When the calculation ran.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// Version of the tax schedule used.
    pub schedule_version: String,
    /// Period the result was recorded in, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_id: Option<u64>,
    /// What the record write did, if the result was recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<UpsertOutcome>,
    /// The payroll result.
    pub result: PayrollResult,
    /// How the result was reached.
    pub audit_trace: AuditTrace,
}

/// Response body of the tax bracket endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxBracketsResponse {
    /// Currency of every amount.
    pub currency: String,
    /// Schedule version.
    pub version: String,
    /// Brackets in ascending order, with cumulative tax.
    pub brackets: Vec<TaxBracket>,
}

/// Response body of `GET /family-status/:code`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyStatusResponse {
    /// The code as requested.
    pub status_code: String,
    /// The parsed status; absent when the code is not recognised.
    pub status: Option<FamilyStatus>,
    /// Default monthly family allowance.
    pub family_allowance: Decimal,
    /// Tax-base reduction fraction.
    pub family_reduction_rate: Decimal,
}
