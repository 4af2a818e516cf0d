//! Calculation result models for the payroll engine.
//!
//! This module contains [`PayrollResult`], the fully-populated record the
//! pipeline produces for one employee and period, together with the audit
//! trace that explains how each figure was reached.
//!
//! Field names and the two-decimal rounding of every monetary field are a
//! contract with report generators and storage; renaming a field or
//! re-rounding one is a breaking change.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The payroll result for one employee and period.
///
/// Every monetary field is rounded to two decimal places from its own
/// formula at assembly time. Consumers must not recompute a figure from
/// other rounded fields (e.g. `gross_salary - inps_employee - ...`) and
/// expect it to match to the cent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// Identifier of the employee.
    pub employee_id: String,
    /// Status code the calculation used.
    pub status_code: String,

    /// Contractual base salary.
    pub base_salary: Decimal,
    /// Days worked in the period.
    pub days_worked: u32,
    /// Unpaid days of absence in the period.
    pub days_absent: u32,
    /// Base salary after the absence deduction.
    pub adjusted_base_salary: Decimal,

    /// Transport allowance (input or default).
    pub transport_allowance: Decimal,
    /// Family allowance (input or status-code lookup).
    pub family_allowance: Decimal,
    /// Responsibility allowance.
    pub responsibility_allowance: Decimal,
    /// Risk premium.
    pub risk_allowance: Decimal,
    /// Housing allowance.
    pub housing_allowance: Decimal,
    /// Overtime pay.
    pub overtime_amount: Decimal,
    /// Bonus.
    pub bonus_amount: Decimal,
    /// Historical special allowance (1973).
    pub special_allowance_1973: Decimal,
    /// Historical cost-of-living allowance (1974).
    pub cost_of_living_1974: Decimal,
    /// Sum of every allowance and bonus.
    pub total_allowances: Decimal,

    /// Adjusted base plus all allowances.
    pub gross_salary: Decimal,
    /// Portion of gross subject to INPS and AMO.
    pub contribution_base: Decimal,

    /// Employee INPS contribution.
    pub inps_employee: Decimal,
    /// Employee AMO contribution.
    pub amo_employee: Decimal,
    /// Monthly income tax.
    pub income_tax: Decimal,
    /// Loan repayment.
    pub loan_deduction: Decimal,
    /// Salary advance repayment.
    pub advance_deduction: Decimal,
    /// Other deductions.
    pub other_deductions: Decimal,
    /// Social contributions, tax and free-form deductions.
    pub total_deductions: Decimal,

    /// Gross minus social contributions and tax.
    pub net_salary: Decimal,
    /// Net salary minus loan, advance and other deductions.
    pub net_to_pay: Decimal,

    /// Employer INPS contribution.
    pub inps_employer: Decimal,
    /// Employer AMO contribution.
    pub amo_employer: Decimal,
    /// Housing tax (TL), on gross.
    pub tl_tax: Decimal,
    /// Vocational training tax (TFP), on gross.
    pub tfp_tax: Decimal,
    /// Youth employment levy (ATEJ), on gross.
    pub atej_tax: Decimal,
    /// CFE business contribution, on gross.
    pub cfe_tax: Decimal,
    /// Sum of the four labor taxes.
    pub total_labor_taxes: Decimal,
    /// Employer social contributions plus labor taxes.
    pub total_employer_cost: Decimal,

    /// Gross plus total employer cost.
    pub total_cost: Decimal,
}

impl PayrollResult {
    /// Employee social contributions (INPS + AMO).
    pub fn employee_social_contributions(&self) -> Decimal {
        self.inps_employee + self.amo_employee
    }

    /// Employer social contributions (INPS + AMO).
    pub fn employer_social_contributions(&self) -> Decimal {
        self.inps_employer + self.amo_employer
    }
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag inputs worth a second look without stopping the calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The audit trace for one payroll calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// A payroll result together with its audit trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollCalculation {
    /// The computed result.
    pub result: PayrollResult,
    /// How the result was reached.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_result() -> PayrollResult {
        PayrollResult {
            employee_id: "EMP-001".to_string(),
            status_code: "C0".to_string(),
            base_salary: dec("500000"),
            days_worked: 26,
            days_absent: 0,
            adjusted_base_salary: dec("500000"),
            transport_allowance: dec("50000"),
            family_allowance: dec("15000"),
            responsibility_allowance: Decimal::ZERO,
            risk_allowance: Decimal::ZERO,
            housing_allowance: Decimal::ZERO,
            overtime_amount: Decimal::ZERO,
            bonus_amount: Decimal::ZERO,
            special_allowance_1973: Decimal::ZERO,
            cost_of_living_1974: Decimal::ZERO,
            total_allowances: dec("65000"),
            gross_salary: dec("565000"),
            contribution_base: dec("565000"),
            inps_employee: dec("20340"),
            amo_employee: dec("17289"),
            income_tax: dec("159082.65"),
            loan_deduction: Decimal::ZERO,
            advance_deduction: Decimal::ZERO,
            other_deductions: Decimal::ZERO,
            total_deductions: dec("196711.65"),
            net_salary: dec("368288.35"),
            net_to_pay: dec("368288.35"),
            inps_employer: dec("92660"),
            amo_employer: dec("19775"),
            tl_tax: dec("5650"),
            tfp_tax: dec("11300"),
            atej_tax: dec("11300"),
            cfe_tax: dec("19775"),
            total_labor_taxes: dec("48025"),
            total_employer_cost: dec("160460"),
            total_cost: dec("725460"),
        }
    }

    #[test]
    fn test_social_contribution_helpers() {
        let result = sample_result();
        assert_eq!(result.employee_social_contributions(), dec("37629"));
        assert_eq!(result.employer_social_contributions(), dec("112435"));
    }

    #[test]
    fn test_result_serializes_decimals_as_strings() {
        let result = sample_result();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["income_tax"], "159082.65");
        assert_eq!(json["days_worked"], 26);
        assert_eq!(json["employee_id"], "EMP-001");
    }

    #[test]
    fn test_result_serialization_round_trip() {
        let result = sample_result();
        let json = serde_json::to_string(&result).unwrap();
        let deserialized: PayrollResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, deserialized);
    }

    #[test]
    fn test_audit_trace_default_is_empty() {
        let trace = AuditTrace::default();
        assert!(trace.steps.is_empty());
        assert!(trace.warnings.is_empty());
    }
}
