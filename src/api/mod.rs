//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for computing payroll, running a
//! whole period, reading period summaries and managing the tax brackets.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculatePayrollRequest, TaxDetailsQuery, UpdateTaxRatesRequest};
pub use response::{
    ApiError, ApiErrorResponse, FamilyStatusResponse, PayrollCalculationResponse,
    TaxBracketsResponse,
};
pub use state::AppState;
