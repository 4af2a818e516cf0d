//! Payroll input model.
//!
//! This module defines [`PayrollInput`], the per-employee, per-period value
//! object the payroll pipeline consumes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Largest monetary amount accepted on any input field.
///
/// Keeps every derived figure (annualised gross, absence deduction, totals)
/// well inside the range of [`Decimal`].
// 1_000_000_000_000_000 == (0x38d7e << 32) | 0xa4c68000
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xa4c6_8000, 0x0003_8d7e, 0, false, 0);

fn default_days_worked() -> u32 {
    26
}

/// Monthly inputs for one employee.
///
/// Allowances that have a computed default are optional: `None` asks the
/// pipeline for the default, `Some(Decimal::ZERO)` is an explicit zero.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollInput;
/// use rust_decimal::Decimal;
///
/// let input = PayrollInput {
///     status_code: "M3".to_string(),
///     risk_allowance: Decimal::from(20000),
///     ..PayrollInput::new("EMP-001", Decimal::from(400000))
/// };
/// assert!(input.validate().is_ok());
/// assert_eq!(input.days_worked, 26);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollInput {
    /// Identifier of the employee.
    pub employee_id: String,
    /// Contractual monthly base salary.
    pub base_salary: Decimal,
    /// Marital/dependents status code (e.g., "C0", "M08").
    #[serde(default)]
    pub status_code: String,
    /// Days worked in the period.
    #[serde(default = "default_days_worked")]
    pub days_worked: u32,
    /// Unpaid days of absence in the period.
    #[serde(default)]
    pub days_absent: u32,
    /// Transport allowance; `None` defaults to a share of the adjusted base.
    #[serde(default)]
    pub transport_allowance: Option<Decimal>,
    /// Family allowance; `None` defaults to the status-code lookup.
    #[serde(default)]
    pub family_allowance: Option<Decimal>,
    /// Responsibility allowance.
    #[serde(default)]
    pub responsibility_allowance: Decimal,
    /// Risk premium.
    #[serde(default)]
    pub risk_allowance: Decimal,
    /// Housing allowance.
    #[serde(default)]
    pub housing_allowance: Decimal,
    /// Overtime pay for the period.
    #[serde(default)]
    pub overtime_amount: Decimal,
    /// Bonus for the period.
    #[serde(default)]
    pub bonus_amount: Decimal,
    /// Historical fixed special allowance (1973).
    #[serde(default)]
    pub special_allowance_1973: Decimal,
    /// Historical fixed cost-of-living allowance (1974).
    #[serde(default)]
    pub cost_of_living_1974: Decimal,
    /// Loan repayment withheld this period.
    #[serde(default)]
    pub loan_deduction: Decimal,
    /// Salary advance withheld this period.
    #[serde(default)]
    pub advance_deduction: Decimal,
    /// Any other free-form deduction.
    #[serde(default)]
    pub other_deductions: Decimal,
}

impl PayrollInput {
    /// Creates an input with a full 26-day month and no allowances or deductions.
    pub fn new(employee_id: impl Into<String>, base_salary: Decimal) -> Self {
        Self {
            employee_id: employee_id.into(),
            base_salary,
            status_code: String::new(),
            days_worked: default_days_worked(),
            days_absent: 0,
            transport_allowance: None,
            family_allowance: None,
            responsibility_allowance: Decimal::ZERO,
            risk_allowance: Decimal::ZERO,
            housing_allowance: Decimal::ZERO,
            overtime_amount: Decimal::ZERO,
            bonus_amount: Decimal::ZERO,
            special_allowance_1973: Decimal::ZERO,
            cost_of_living_1974: Decimal::ZERO,
            loan_deduction: Decimal::ZERO,
            advance_deduction: Decimal::ZERO,
            other_deductions: Decimal::ZERO,
        }
    }

    /// Validates the input at the boundary, before it reaches the pipeline.
    ///
    /// Rejects an empty employee id and any monetary amount that is negative
    /// or above [`MAX_AMOUNT`]. The attendance total is not checked against
    /// the standard month.
    pub fn validate(&self) -> EngineResult<()> {
        if self.employee_id.trim().is_empty() {
            return Err(EngineError::InvalidPayrollInput {
                field: "employee_id".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        let amounts = [
            ("base_salary", Some(self.base_salary)),
            ("transport_allowance", self.transport_allowance),
            ("family_allowance", self.family_allowance),
            ("responsibility_allowance", Some(self.responsibility_allowance)),
            ("risk_allowance", Some(self.risk_allowance)),
            ("housing_allowance", Some(self.housing_allowance)),
            ("overtime_amount", Some(self.overtime_amount)),
            ("bonus_amount", Some(self.bonus_amount)),
            ("special_allowance_1973", Some(self.special_allowance_1973)),
            ("cost_of_living_1974", Some(self.cost_of_living_1974)),
            ("loan_deduction", Some(self.loan_deduction)),
            ("advance_deduction", Some(self.advance_deduction)),
            ("other_deductions", Some(self.other_deductions)),
        ];

        for (field, amount) in amounts {
            if amount.is_some_and(|value| value < Decimal::ZERO) {
                return Err(EngineError::InvalidPayrollInput {
                    field: field.to_string(),
                    message: "must not be negative".to_string(),
                });
            }
            if amount.is_some_and(|value| value > MAX_AMOUNT) {
                return Err(EngineError::InvalidPayrollInput {
                    field: field.to_string(),
                    message: format!("must not exceed {}", MAX_AMOUNT),
                });
            }
        }

        Ok(())
    }
}
