//! Social contributions and employer labor taxes.

use rust_decimal::Decimal;

use crate::config::{LaborTaxRates, StatutoryRates};

use super::allowances::AllowanceBreakdown;

/// The INPS/AMO contribution base: adjusted base plus eligible allowances.
pub fn contribution_base(adjusted_base: Decimal, allowances: &AllowanceBreakdown) -> Decimal {
    adjusted_base + allowances.contribution_eligible()
}

/// One side's INPS and AMO contributions, unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialContributions {
    /// INPS social security.
    pub inps: Decimal,
    /// AMO health insurance.
    pub amo: Decimal,
}

impl SocialContributions {
    /// Employee share, each rate applied to the base separately.
    pub fn employee_contributions(base: Decimal, rates: &StatutoryRates) -> Self {
        Self {
            inps: base * rates.inps.employee,
            amo: base * rates.amo.employee,
        }
    }

    /// Employer share.
    pub fn employer_contributions(base: Decimal, rates: &StatutoryRates) -> Self {
        Self {
            inps: base * rates.inps.employer,
            amo: base * rates.amo.employer,
        }
    }

    /// INPS + AMO.
    pub fn total(&self) -> Decimal {
        self.inps + self.amo
    }
}

/// Employer labor taxes on gross salary, unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaborTaxes {
    /// Housing tax.
    pub tl: Decimal,
    /// Vocational training tax.
    pub tfp: Decimal,
    /// Youth employment levy.
    pub atej: Decimal,
    /// CFE business contribution.
    pub cfe: Decimal,
}

impl LaborTaxes {
    /// Applies each labor tax rate to the gross salary.
    pub fn on_gross(gross_salary: Decimal, rates: &LaborTaxRates) -> Self {
        Self {
            tl: gross_salary * rates.tl,
            tfp: gross_salary * rates.tfp,
            atej: gross_salary * rates.atej,
            cfe: gross_salary * rates.cfe,
        }
    }

    /// Sum of the four taxes.
    pub fn total(&self) -> Decimal {
        self.tl + self.tfp + self.atej + self.cfe
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_employee_contributions_on_full_month() {
        let rates = StatutoryRates::mali_defaults();
        let contributions = SocialContributions::employee_contributions(dec("565000"), &rates);

        assert_eq!(contributions.inps, dec("20340"));
        assert_eq!(contributions.amo, dec("17289"));
        assert_eq!(contributions.total(), dec("37629"));
    }

    #[test]
    fn test_employer_contributions_on_full_month() {
        let rates = StatutoryRates::mali_defaults();
        let contributions = SocialContributions::employer_contributions(dec("565000"), &rates);

        assert_eq!(contributions.inps, dec("92660"));
        assert_eq!(contributions.amo, dec("19775"));
    }

    #[test]
    fn test_labor_taxes_on_gross() {
        let rates = StatutoryRates::mali_defaults();
        let taxes = LaborTaxes::on_gross(dec("565000"), &rates.labor_taxes);

        assert_eq!(taxes.tl, dec("5650"));
        assert_eq!(taxes.tfp, dec("11300"));
        assert_eq!(taxes.atej, dec("11300"));
        assert_eq!(taxes.cfe, dec("19775"));
        assert_eq!(taxes.total(), dec("48025"));
    }

    #[test]
    fn test_contribution_base_excludes_risk_and_bonus() {
        let allowances = AllowanceBreakdown {
            transport: dec("50000"),
            family: dec("15000"),
            responsibility: dec("10000"),
            risk: dec("20000"),
            housing: dec("30000"),
            overtime: dec("40000"),
            bonus: dec("50000"),
            special_1973: dec("1000"),
            cost_of_living_1974: dec("2000"),
            total: dec("218000"),
            transport_defaulted: true,
            family_defaulted: true,
        };

        assert_eq!(contribution_base(dec("500000"), &allowances), dec("568000"));
    }
}
