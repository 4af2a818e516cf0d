//! Stored payroll records and period totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PayrollResult;

/// A payroll result as stored for a period.
///
/// At most one record exists per (employee, period).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Storage identifier, stable across recomputations.
    pub record_id: u64,
    /// The period the record belongs to.
    pub period_id: u64,
    /// The latest computed result.
    pub result: PayrollResult,
}

/// Totals over every stored record of a period.
///
/// Sums are taken over the already-rounded result fields and are not
/// rounded again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// The summarised period.
    pub period_id: u64,
    /// Number of employees with a stored record.
    pub employee_count: usize,
    /// Sum of gross salaries.
    pub total_gross: Decimal,
    /// Sum of employee INPS contributions.
    pub total_inps_employee: Decimal,
    /// Sum of employee AMO contributions.
    pub total_amo_employee: Decimal,
    /// Sum of income tax.
    pub total_income_tax: Decimal,
    /// Sum of loan, advance and other deductions.
    pub total_loans_and_advances: Decimal,
    /// Sum of net-to-pay.
    pub total_net_to_pay: Decimal,
    /// Sum of employer INPS contributions.
    pub total_inps_employer: Decimal,
    /// Sum of employer AMO contributions.
    pub total_amo_employer: Decimal,
    /// Sum of TL, TFP, ATEJ and CFE.
    pub total_labor_taxes: Decimal,
    /// Sum of fully-loaded employment cost.
    pub total_cost: Decimal,
}

impl PeriodSummary {
    /// Aggregates the given results.
    pub fn from_results<'a, I>(period_id: u64, results: I) -> Self
    where
        I: IntoIterator<Item = &'a PayrollResult>,
    {
        let mut summary = Self {
            period_id,
            employee_count: 0,
            total_gross: Decimal::ZERO,
            total_inps_employee: Decimal::ZERO,
            total_amo_employee: Decimal::ZERO,
            total_income_tax: Decimal::ZERO,
            total_loans_and_advances: Decimal::ZERO,
            total_net_to_pay: Decimal::ZERO,
            total_inps_employer: Decimal::ZERO,
            total_amo_employer: Decimal::ZERO,
            total_labor_taxes: Decimal::ZERO,
            total_cost: Decimal::ZERO,
        };

        for result in results {
            summary.employee_count += 1;
            summary.total_gross += result.gross_salary;
            summary.total_inps_employee += result.inps_employee;
            summary.total_amo_employee += result.amo_employee;
            summary.total_income_tax += result.income_tax;
            summary.total_loans_and_advances +=
                result.loan_deduction + result.advance_deduction + result.other_deductions;
            summary.total_net_to_pay += result.net_to_pay;
            summary.total_inps_employer += result.inps_employer;
            summary.total_amo_employer += result.amo_employer;
            summary.total_labor_taxes += result.total_labor_taxes;
            summary.total_cost += result.total_cost;
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PayrollConfig;
    use crate::calculation::PayrollPipeline;
    use crate::models::PayrollInput;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_empty_summary_is_zero() {
        let summary = PeriodSummary::from_results(9, std::iter::empty());
        assert_eq!(summary.period_id, 9);
        assert_eq!(summary.employee_count, 0);
        assert_eq!(summary.total_cost, Decimal::ZERO);
    }

    #[test]
    fn test_summary_adds_stored_figures() {
        let config = PayrollConfig::mali_defaults();
        let pipeline = PayrollPipeline::new(&config);

        let first = pipeline.calculate(&PayrollInput {
            loan_deduction: dec("10000"),
            ..PayrollInput::new("EMP-001", dec("200000"))
        });
        let second = pipeline.calculate(&PayrollInput {
            advance_deduction: dec("5000"),
            ..PayrollInput::new("EMP-002", dec("300000"))
        });

        let summary = PeriodSummary::from_results(1, [&first, &second]);

        assert_eq!(summary.employee_count, 2);
        assert_eq!(summary.total_gross, first.gross_salary + second.gross_salary);
        assert_eq!(summary.total_loans_and_advances, dec("15000"));
        assert_eq!(summary.total_net_to_pay, first.net_to_pay + second.net_to_pay);
        assert_eq!(
            summary.total_labor_taxes,
            first.total_labor_taxes + second.total_labor_taxes
        );
        assert_eq!(summary.total_cost, first.total_cost + second.total_cost);
    }
}
