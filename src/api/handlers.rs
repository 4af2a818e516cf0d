//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    PayrollPipeline, TaxEngine, calculate_period, family_allowance, family_reduction_fraction,
    summarize_period,
};
use crate::error::EngineError;
use crate::models::FamilyStatus;
use crate::repository::PayrollResultSink;

use super::request::{CalculatePayrollRequest, TaxDetailsQuery, UpdateTaxRatesRequest};
use super::response::{
    ApiError, ApiErrorResponse, FamilyStatusResponse, PayrollCalculationResponse,
    TaxBracketsResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll/calculate", post(calculate_handler))
        .route(
            "/payroll/periods/:period_id/calculate-all",
            post(calculate_period_handler),
        )
        .route("/payroll/periods/:period_id/summary", get(period_summary_handler))
        .route(
            "/tax/brackets",
            get(get_brackets_handler).put(update_brackets_handler),
        )
        .route("/tax/details", get(tax_details_handler))
        .route("/family-status/:code", get(family_status_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

fn engine_error_response(correlation_id: Uuid, err: EngineError, context: &str) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "{}", context
    );
    error_response(err.into())
}

/// Maps a JSON body rejection to a 400 response.
fn json_rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for `POST /payroll/calculate`.
///
/// Validates the input, computes the result with its audit trace and, when a
/// period is given, records it.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculatePayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll calculation request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    if let Err(err) = request.input.validate() {
        return engine_error_response(correlation_id, err, "Payroll input rejected");
    }

    let config = state.config().snapshot();
    let start_time = Instant::now();
    let calculation = PayrollPipeline::new(&config).calculate_with_trace(&request.input);

    let record = match request.period_id {
        Some(period_id) => match state.store().upsert_result(period_id, &calculation.result) {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                return engine_error_response(correlation_id, err, "Failed to record payroll result");
            }
        },
        None => None,
    };

    info!(
        correlation_id = %correlation_id,
        employee_id = %calculation.result.employee_id,
        gross_salary = %calculation.result.gross_salary,
        net_to_pay = %calculation.result.net_to_pay,
        warnings = calculation.audit_trace.warnings.len(),
        duration_us = start_time.elapsed().as_micros() as u64,
        "Payroll calculation completed"
    );

    json_response(
        StatusCode::OK,
        PayrollCalculationResponse {
            calculation_id: correlation_id,
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            schedule_version: config.metadata().version.clone(),
            period_id: request.period_id,
            record,
            result: calculation.result,
            audit_trace: calculation.audit_trace,
        },
    )
}

/// Handler for `POST /payroll/periods/:period_id/calculate-all`.
async fn calculate_period_handler(
    State(state): State<AppState>,
    Path(period_id): Path<u64>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, period_id, "Recomputing payroll period");

    let config = state.config().snapshot();
    match calculate_period(&config, state.store(), period_id) {
        Ok(report) => json_response(StatusCode::OK, report),
        Err(err) => engine_error_response(correlation_id, err, "Period recomputation failed"),
    }
}

/// Handler for `GET /payroll/periods/:period_id/summary`.
async fn period_summary_handler(
    State(state): State<AppState>,
    Path(period_id): Path<u64>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    match summarize_period(state.store(), period_id) {
        Ok(summary) => json_response(StatusCode::OK, summary),
        Err(err) => engine_error_response(correlation_id, err, "Period summary failed"),
    }
}

/// Handler for `GET /tax/brackets`.
async fn get_brackets_handler(State(state): State<AppState>) -> Response {
    let config = state.config().snapshot();
    json_response(
        StatusCode::OK,
        TaxBracketsResponse {
            currency: config.metadata().currency.clone(),
            version: config.metadata().version.clone(),
            brackets: config.tax_schedule().brackets().to_vec(),
        },
    )
}

/// Handler for `PUT /tax/brackets`.
///
/// Replaces the bracket rates; bounds are kept and cumulative tax is
/// recomputed. Calculations already running keep their snapshot.
async fn update_brackets_handler(
    State(state): State<AppState>,
    payload: Result<Json<UpdateTaxRatesRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing tax rate update");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    match state.config().update_tax_rates(&request.rates) {
        Ok(config) => json_response(
            StatusCode::OK,
            TaxBracketsResponse {
                currency: config.metadata().currency.clone(),
                version: config.metadata().version.clone(),
                brackets: config.tax_schedule().brackets().to_vec(),
            },
        ),
        Err(err) => engine_error_response(correlation_id, err, "Tax rate update rejected"),
    }
}

/// Handler for `GET /tax/details?gross=..&status=..`.
async fn tax_details_handler(
    State(state): State<AppState>,
    query: Result<Query<TaxDetailsQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                ApiError::validation_error(rejection.body_text()),
            );
        }
    };

    if let Err(err) = query.validate() {
        return engine_error_response(Uuid::new_v4(), err, "Tax details query rejected");
    }

    let config = state.config().snapshot();
    let details = TaxEngine::new(config.tax_schedule()).calculate_tax_details(query.gross, &query.status);
    json_response(StatusCode::OK, details)
}

/// Handler for `GET /family-status/:code`.
async fn family_status_handler(Path(code): Path<String>) -> Response {
    json_response(
        StatusCode::OK,
        FamilyStatusResponse {
            status: FamilyStatus::parse(&code),
            family_allowance: family_allowance(&code),
            family_reduction_rate: family_reduction_fraction(&code),
            status_code: code,
        },
    )
}
