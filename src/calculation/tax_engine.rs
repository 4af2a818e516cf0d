//! Progressive income tax.
//!
//! This module evaluates the annual income tax on a taxable income under a
//! [`TaxSchedule`] and projects it to a monthly withholding, optionally after
//! a family-based reduction of the tax base.
//!
//! Bracket bounds are inclusive on both ends: the slice of income taxed in a
//! bracket is `min(income, max_income) - min_income + 1`. An income of
//! 330 000 is therefore untaxed under the Mali table while 330 001 owes
//! 0.05, one unit into the 5% bracket.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::TaxSchedule;

use super::family_rules::family_reduction_fraction;
use super::rounding::round_currency;

const MONTHS_PER_YEAR: i64 = 12;

/// Detailed tax figures for one monthly gross salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// Monthly gross salary.
    pub monthly_gross: Decimal,
    /// Monthly gross × 12.
    pub annual_gross: Decimal,
    /// Status code used for the reduction.
    pub status_code: String,
    /// Family reduction fraction applied to the tax base.
    pub family_reduction_rate: Decimal,
    /// Annual gross after the reduction.
    pub annual_taxable: Decimal,
    /// Annual tax on the taxable income.
    pub annual_tax: Decimal,
    /// Annual tax ÷ 12.
    pub monthly_tax: Decimal,
    /// Monthly tax as a percentage of monthly gross.
    pub effective_tax_rate: Decimal,
}

/// Tax calculator over one bracket schedule snapshot.
///
/// The engine only borrows the schedule; it keeps no state between calls.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::TaxEngine;
/// use payroll_engine::models::TaxSchedule;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let schedule = TaxSchedule::mali_2019();
/// let engine = TaxEngine::new(&schedule);
///
/// assert_eq!(engine.calculate_annual_tax(Decimal::from(330000)), Decimal::ZERO);
/// assert_eq!(
///     engine.calculate_annual_tax(Decimal::from(330001)),
///     Decimal::from_str("0.05").unwrap()
/// );
/// assert_eq!(
///     engine.calculate_monthly_tax(Decimal::from(565000), Decimal::ZERO),
///     Decimal::from_str("159082.65").unwrap()
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TaxEngine<'a> {
    schedule: &'a TaxSchedule,
}

impl<'a> TaxEngine<'a> {
    /// Creates a tax engine over the given schedule.
    pub fn new(schedule: &'a TaxSchedule) -> Self {
        Self { schedule }
    }

    /// Annual tax owed on `annual_taxable_income`, rounded to two decimals.
    ///
    /// Walks the brackets in ascending order, taxing each visited bracket's
    /// slice at its rate, and stops at the first bracket starting above the
    /// income. A non-positive income owes nothing.
    pub fn calculate_annual_tax(&self, annual_taxable_income: Decimal) -> Decimal {
        if annual_taxable_income <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let mut tax = Decimal::ZERO;
        for bracket in self.schedule.brackets() {
            if annual_taxable_income < bracket.min_income {
                break;
            }

            let slice_top = match bracket.max_income {
                Some(max_income) => annual_taxable_income.min(max_income),
                None => annual_taxable_income,
            };
            tax += (slice_top - bracket.min_income + Decimal::ONE) * bracket.rate;
        }

        round_currency(tax)
    }

    /// Annual tax computed from the containing bracket's cumulative tax.
    ///
    /// Agrees with [`calculate_annual_tax`](Self::calculate_annual_tax) to
    /// the cent for any income.
    pub fn annual_tax_from_cumulative(&self, annual_taxable_income: Decimal) -> Decimal {
        if annual_taxable_income <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let Some(bracket) = self.schedule.bracket_for(annual_taxable_income) else {
            return Decimal::ZERO;
        };

        let slice_top = match bracket.max_income {
            Some(max_income) => annual_taxable_income.min(max_income),
            None => annual_taxable_income,
        };
        round_currency(
            bracket.cumulative_tax + (slice_top - bracket.min_income + Decimal::ONE) * bracket.rate,
        )
    }

    /// Monthly tax on a monthly gross salary.
    ///
    /// The salary is annualised, the family reduction (if positive) shrinks
    /// the tax base, and the rounded annual tax is divided by 12 and rounded
    /// again. The reduction applies to the base, never to the tax amount.
    /// Callers bound the gross by [`MAX_AMOUNT`](crate::models::MAX_AMOUNT)
    /// so the annualised figure stays within [`Decimal`] range.
    pub fn calculate_monthly_tax(
        &self,
        monthly_gross_salary: Decimal,
        family_reduction_fraction: Decimal,
    ) -> Decimal {
        let annual_taxable = Self::annual_taxable(monthly_gross_salary, family_reduction_fraction);
        let annual_tax = self.calculate_annual_tax(annual_taxable);
        let monthly_tax = round_currency(annual_tax / Decimal::from(MONTHS_PER_YEAR));

        debug!(
            monthly_gross = %monthly_gross_salary,
            reduction = %family_reduction_fraction,
            annual_taxable = %annual_taxable,
            annual_tax = %annual_tax,
            monthly_tax = %monthly_tax,
            "Computed monthly income tax"
        );

        monthly_tax
    }

    /// Family reduction fraction for a status code.
    pub fn get_family_reduction_fraction(&self, status_code: &str) -> Decimal {
        family_reduction_fraction(status_code)
    }

    /// Full tax breakdown for a monthly gross salary and status code.
    pub fn calculate_tax_details(
        &self,
        monthly_gross_salary: Decimal,
        status_code: &str,
    ) -> TaxBreakdown {
        let reduction = family_reduction_fraction(status_code);
        let annual_gross = monthly_gross_salary * Decimal::from(MONTHS_PER_YEAR);
        let annual_taxable = Self::annual_taxable(monthly_gross_salary, reduction);
        let annual_tax = self.calculate_annual_tax(annual_taxable);
        let monthly_tax = round_currency(annual_tax / Decimal::from(MONTHS_PER_YEAR));

        let effective_tax_rate = if monthly_gross_salary > Decimal::ZERO {
            round_currency(monthly_tax / monthly_gross_salary * Decimal::ONE_HUNDRED)
        } else {
            Decimal::ZERO
        };

        TaxBreakdown {
            monthly_gross: round_currency(monthly_gross_salary),
            annual_gross: round_currency(annual_gross),
            status_code: status_code.to_string(),
            family_reduction_rate: reduction,
            annual_taxable: round_currency(annual_taxable),
            annual_tax,
            monthly_tax,
            effective_tax_rate,
        }
    }

    fn annual_taxable(monthly_gross_salary: Decimal, family_reduction_fraction: Decimal) -> Decimal {
        let annual = monthly_gross_salary * Decimal::from(MONTHS_PER_YEAR);
        if family_reduction_fraction > Decimal::ZERO {
            annual * (Decimal::ONE - family_reduction_fraction)
        } else {
            annual
        }
    }
}
