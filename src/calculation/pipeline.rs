//! The monthly payroll pipeline.
//!
//! [`PayrollPipeline`] turns one validated [`PayrollInput`] into a fully
//! populated [`PayrollResult`], in this order:
//!
//! 1. Attendance adjustment of the base salary
//! 2. Allowance aggregation (transport and family defaults)
//! 3. Gross salary
//! 4. Contribution base
//! 5. Employee social contributions
//! 6. Income tax
//! 7. Net salary and net-to-pay
//! 8. Employer contributions and labor taxes
//!
//! Every stage works on unrounded values; each result field is rounded once,
//! from its own formula, when the result is assembled.

use rust_decimal::Decimal;

use crate::config::PayrollConfig;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, FamilyStatus, PayrollCalculation, PayrollInput,
    PayrollResult,
};

use super::allowances::aggregate_allowances;
use super::attendance::adjust_base_salary;
use super::contributions::{LaborTaxes, SocialContributions, contribution_base};
use super::family_rules::family_reduction_fraction;
use super::rounding::round_currency;
use super::tax_engine::TaxEngine;

/// Warning raised when worked plus absent days differ from the standard month.
pub const ATTENDANCE_MISMATCH: &str = "ATTENDANCE_MISMATCH";
/// Warning raised when absences exceed the standard month.
pub const ABSENCE_EXCEEDS_MONTH: &str = "ABSENCE_EXCEEDS_MONTH";
/// Warning raised when the status code cannot be parsed.
pub const UNRECOGNISED_STATUS_CODE: &str = "UNRECOGNISED_STATUS_CODE";
/// Warning raised when the transport allowance was computed rather than supplied.
pub const TRANSPORT_DEFAULTED: &str = "TRANSPORT_DEFAULTED";

/// Payroll calculator over one configuration snapshot.
///
/// The pipeline is a pure function of its input and the borrowed
/// configuration: identical inputs always produce identical results.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::PayrollPipeline;
/// use payroll_engine::config::PayrollConfig;
/// use payroll_engine::models::PayrollInput;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = PayrollConfig::mali_defaults();
/// let pipeline = PayrollPipeline::new(&config);
///
/// let input = PayrollInput {
///     status_code: "C0".to_string(),
///     ..PayrollInput::new("EMP-001", Decimal::from(500000))
/// };
/// let result = pipeline.calculate(&input);
///
/// assert_eq!(result.gross_salary, Decimal::from(565000));
/// assert_eq!(result.income_tax, Decimal::from_str("159082.65").unwrap());
/// assert_eq!(result.net_to_pay, Decimal::from_str("368288.35").unwrap());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PayrollPipeline<'a> {
    config: &'a PayrollConfig,
}

impl<'a> PayrollPipeline<'a> {
    /// Creates a pipeline over the given configuration snapshot.
    pub fn new(config: &'a PayrollConfig) -> Self {
        Self { config }
    }

    /// Computes the payroll result for one input.
    pub fn calculate(&self, input: &PayrollInput) -> PayrollResult {
        self.calculate_with_trace(input).result
    }

    /// Computes the payroll result together with its audit trace.
    ///
    /// The input is expected to have passed [`PayrollInput::validate`], which
    /// bounds every amount by [`MAX_AMOUNT`](crate::models::MAX_AMOUNT).
    pub fn calculate_with_trace(&self, input: &PayrollInput) -> PayrollCalculation {
        let rates = self.config.rates();
        let standard_days = rates.standard_working_days;
        let mut steps: Vec<AuditStep> = Vec::with_capacity(8);
        let mut warnings: Vec<AuditWarning> = Vec::new();
        let mut step_number: u32 = 1;

        // Attendance
        let attendance = adjust_base_salary(
            input.base_salary,
            input.days_worked,
            input.days_absent,
            standard_days,
            step_number,
        );
        let adjusted_base = attendance.adjusted_base;
        steps.push(attendance.audit_step);
        step_number += 1;

        if input.days_absent > standard_days {
            warnings.push(warning(
                ABSENCE_EXCEEDS_MONTH,
                format!(
                    "{} days absent exceeds the {}-day month; adjusted base clamped to 0",
                    input.days_absent, standard_days
                ),
                "medium",
            ));
        } else if input.days_worked.checked_add(input.days_absent) != Some(standard_days) {
            warnings.push(warning(
                ATTENDANCE_MISMATCH,
                format!(
                    "{} days worked + {} days absent differs from the {}-day standard month",
                    input.days_worked, input.days_absent, standard_days
                ),
                "low",
            ));
        }

        // Allowances
        let aggregation = aggregate_allowances(
            input,
            adjusted_base,
            rates.transport_allowance_rate,
            step_number,
        );
        let allowances = aggregation.allowances;
        steps.push(aggregation.audit_step);
        step_number += 1;

        if allowances.transport_defaulted {
            warnings.push(warning(
                TRANSPORT_DEFAULTED,
                format!(
                    "Transport allowance not supplied; defaulted to {} of adjusted base",
                    rates.transport_allowance_rate.normalize()
                ),
                "low",
            ));
        }
        if FamilyStatus::parse(&input.status_code).is_none() {
            warnings.push(warning(
                UNRECOGNISED_STATUS_CODE,
                format!(
                    "Status code '{}' is not recognised; no family allowance default or tax reduction applied",
                    input.status_code
                ),
                "medium",
            ));
        }

        // Gross
        let gross = adjusted_base + allowances.total;
        steps.push(AuditStep {
            step_number,
            rule_id: "gross_salary".to_string(),
            rule_name: "Gross Salary".to_string(),
            input: serde_json::json!({
                "adjusted_base": round_currency(adjusted_base).to_string(),
                "total_allowances": round_currency(allowances.total).to_string()
            }),
            output: serde_json::json!({
                "gross_salary": round_currency(gross).to_string()
            }),
            reasoning: "Gross = adjusted base + total allowances".to_string(),
        });
        step_number += 1;

        // Contribution base
        let base = contribution_base(adjusted_base, &allowances);
        steps.push(AuditStep {
            step_number,
            rule_id: "contribution_base".to_string(),
            rule_name: "Contribution Base".to_string(),
            input: serde_json::json!({
                "adjusted_base": round_currency(adjusted_base).to_string(),
                "transport": round_currency(allowances.transport).to_string(),
                "family": round_currency(allowances.family).to_string(),
                "special_1973": round_currency(allowances.special_1973).to_string(),
                "cost_of_living_1974": round_currency(allowances.cost_of_living_1974).to_string()
            }),
            output: serde_json::json!({
                "contribution_base": round_currency(base).to_string()
            }),
            reasoning: "Responsibility, risk, housing, overtime and bonus are excluded from the contribution base"
                .to_string(),
        });
        step_number += 1;

        // Employee contributions
        let employee = SocialContributions::employee_contributions(base, rates);
        steps.push(AuditStep {
            step_number,
            rule_id: "employee_contributions".to_string(),
            rule_name: "Employee Social Contributions".to_string(),
            input: serde_json::json!({
                "contribution_base": round_currency(base).to_string(),
                "inps_rate": rates.inps.employee.to_string(),
                "amo_rate": rates.amo.employee.to_string()
            }),
            output: serde_json::json!({
                "inps_employee": round_currency(employee.inps).to_string(),
                "amo_employee": round_currency(employee.amo).to_string()
            }),
            reasoning: format!(
                "INPS {} and AMO {} each applied to the contribution base",
                rates.inps.employee.normalize(),
                rates.amo.employee.normalize()
            ),
        });
        step_number += 1;

        // Income tax
        let tax_engine = TaxEngine::new(self.config.tax_schedule());
        let reduction = family_reduction_fraction(&input.status_code);
        let income_tax = tax_engine.calculate_monthly_tax(gross, reduction);
        steps.push(AuditStep {
            step_number,
            rule_id: "income_tax".to_string(),
            rule_name: "Income Tax".to_string(),
            input: serde_json::json!({
                "gross_salary": round_currency(gross).to_string(),
                "status_code": input.status_code,
                "family_reduction": reduction.to_string()
            }),
            output: serde_json::json!({
                "income_tax": income_tax.to_string()
            }),
            reasoning: format!(
                "Annualised gross reduced by {}%, taxed by bracket, divided by 12",
                (reduction * Decimal::ONE_HUNDRED).normalize()
            ),
        });
        step_number += 1;

        // Net
        let other_deductions = input.loan_deduction + input.advance_deduction + input.other_deductions;
        let net_salary = gross - employee.total() - income_tax;
        let net_to_pay = net_salary - other_deductions;
        let total_deductions = employee.total() + income_tax + other_deductions;
        steps.push(AuditStep {
            step_number,
            rule_id: "net_pay".to_string(),
            rule_name: "Net Pay".to_string(),
            input: serde_json::json!({
                "gross_salary": round_currency(gross).to_string(),
                "social_contributions": round_currency(employee.total()).to_string(),
                "income_tax": income_tax.to_string(),
                "loan_advance_other": round_currency(other_deductions).to_string()
            }),
            output: serde_json::json!({
                "net_salary": round_currency(net_salary).to_string(),
                "net_to_pay": round_currency(net_to_pay).to_string()
            }),
            reasoning: "Net = gross - social contributions - tax; net to pay also withholds loan, advance and other deductions"
                .to_string(),
        });
        step_number += 1;

        // Employer
        let employer = SocialContributions::employer_contributions(base, rates);
        let labor_taxes = LaborTaxes::on_gross(gross, &rates.labor_taxes);
        let total_employer_cost = employer.total() + labor_taxes.total();
        let total_cost = gross + total_employer_cost;
        steps.push(AuditStep {
            step_number,
            rule_id: "employer_cost".to_string(),
            rule_name: "Employer Cost".to_string(),
            input: serde_json::json!({
                "contribution_base": round_currency(base).to_string(),
                "gross_salary": round_currency(gross).to_string()
            }),
            output: serde_json::json!({
                "employer_contributions": round_currency(employer.total()).to_string(),
                "labor_taxes": round_currency(labor_taxes.total()).to_string(),
                "total_cost": round_currency(total_cost).to_string()
            }),
            reasoning: "Employer INPS/AMO on the contribution base; TL, TFP, ATEJ and CFE on gross"
                .to_string(),
        });

        let result = PayrollResult {
            employee_id: input.employee_id.clone(),
            status_code: input.status_code.clone(),
            base_salary: round_currency(input.base_salary),
            days_worked: input.days_worked,
            days_absent: input.days_absent,
            adjusted_base_salary: round_currency(adjusted_base),
            transport_allowance: round_currency(allowances.transport),
            family_allowance: round_currency(allowances.family),
            responsibility_allowance: round_currency(allowances.responsibility),
            risk_allowance: round_currency(allowances.risk),
            housing_allowance: round_currency(allowances.housing),
            overtime_amount: round_currency(allowances.overtime),
            bonus_amount: round_currency(allowances.bonus),
            special_allowance_1973: round_currency(allowances.special_1973),
            cost_of_living_1974: round_currency(allowances.cost_of_living_1974),
            total_allowances: round_currency(allowances.total),
            gross_salary: round_currency(gross),
            contribution_base: round_currency(base),
            inps_employee: round_currency(employee.inps),
            amo_employee: round_currency(employee.amo),
            income_tax,
            loan_deduction: round_currency(input.loan_deduction),
            advance_deduction: round_currency(input.advance_deduction),
            other_deductions: round_currency(input.other_deductions),
            total_deductions: round_currency(total_deductions),
            net_salary: round_currency(net_salary),
            net_to_pay: round_currency(net_to_pay),
            inps_employer: round_currency(employer.inps),
            amo_employer: round_currency(employer.amo),
            tl_tax: round_currency(labor_taxes.tl),
            tfp_tax: round_currency(labor_taxes.tfp),
            atej_tax: round_currency(labor_taxes.atej),
            cfe_tax: round_currency(labor_taxes.cfe),
            total_labor_taxes: round_currency(labor_taxes.total()),
            total_employer_cost: round_currency(total_employer_cost),
            total_cost: round_currency(total_cost),
        };

        PayrollCalculation {
            result,
            audit_trace: AuditTrace { steps, warnings },
        }
    }
}

fn warning(code: &str, message: String, severity: &str) -> AuditWarning {
    AuditWarning {
        code: code.to_string(),
        message,
        severity: severity.to_string(),
    }
}
