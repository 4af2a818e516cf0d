//! Request types for the payroll API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{MAX_AMOUNT, PayrollInput};

/// Request body for `POST /payroll/calculate`.
///
/// When `period_id` is given the computed result is also written to that
/// period's records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatePayrollRequest {
    /// Period to record the result in, if any.
    #[serde(default)]
    pub period_id: Option<u64>,
    /// The employee's monthly input.
    pub input: PayrollInput,
}

/// Request body for `PUT /tax/brackets`.
///
/// One rate per bracket, in ascending bracket order. Bounds are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTaxRatesRequest {
    /// New marginal rates as fractions.
    pub rates: Vec<Decimal>,
}

/// Query string of `GET /tax/details`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxDetailsQuery {
    /// Monthly gross salary.
    pub gross: Decimal,
    /// Family status code; empty means no reduction.
    #[serde(default)]
    pub status: String,
}

impl TaxDetailsQuery {
    /// Rejects a gross salary above [`MAX_AMOUNT`].
    pub fn validate(&self) -> EngineResult<()> {
        if self.gross > MAX_AMOUNT {
            return Err(EngineError::InvalidPayrollInput {
                field: "gross".to_string(),
                message: format!("must not exceed {}", MAX_AMOUNT),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_request_without_period() {
        let json = r#"{
            "input": { "employee_id": "EMP-001", "base_salary": "500000", "status_code": "C0" }
        }"#;

        let request: CalculatePayrollRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.period_id, None);
        assert_eq!(request.input.employee_id, "EMP-001");
        assert_eq!(request.input.days_worked, 26);
    }

    #[test]
    fn test_calculate_request_requires_input() {
        let result: Result<CalculatePayrollRequest, _> = serde_json::from_str(r#"{"period_id": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_tax_details_query_rejects_gross_above_ceiling() {
        let query = TaxDetailsQuery {
            gross: MAX_AMOUNT + Decimal::ONE,
            status: "C0".to_string(),
        };
        assert!(matches!(
            query.validate(),
            Err(EngineError::InvalidPayrollInput { field, .. }) if field == "gross"
        ));

        let query = TaxDetailsQuery {
            gross: MAX_AMOUNT,
            status: String::new(),
        };
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_update_rates_request() {
        let request: UpdateTaxRatesRequest =
            serde_json::from_str(r#"{"rates": ["0", "0.05", "0.12"]}"#).unwrap();
        assert_eq!(request.rates.len(), 3);
        assert_eq!(request.rates[1], Decimal::new(5, 2));
    }
}
