//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{BracketDefinition, TaxSchedule};

/// Metadata about the statutory schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleMetadata {
    /// Country code (e.g., "ML").
    pub code: String,
    /// Human-readable name of the schedule.
    pub name: String,
    /// Currency of every amount (e.g., "XOF").
    pub currency: String,
    /// The version or effective year of the schedule.
    pub version: String,
}

/// Employee and employer rates of one social contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRates {
    /// Share withheld from the employee.
    pub employee: Decimal,
    /// Share paid by the employer.
    pub employer: Decimal,
}

/// Employer labor taxes, each a fraction of gross salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborTaxRates {
    /// Housing tax (taxe logement).
    pub tl: Decimal,
    /// Vocational training tax (taxe de formation professionnelle).
    pub tfp: Decimal,
    /// Youth employment levy.
    pub atej: Decimal,
    /// CFE business contribution.
    pub cfe: Decimal,
}

fn default_transport_allowance_rate() -> Decimal {
    Decimal::new(10, 2)
}

fn default_standard_working_days() -> u32 {
    26
}

/// Statutory rates from rates.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryRates {
    /// INPS social security rates.
    pub inps: ContributionRates,
    /// AMO health insurance rates.
    pub amo: ContributionRates,
    /// Employer labor taxes.
    pub labor_taxes: LaborTaxRates,
    /// Default transport allowance as a fraction of the adjusted base.
    #[serde(default = "default_transport_allowance_rate")]
    pub transport_allowance_rate: Decimal,
    /// Length of the standard month used for the daily rate.
    #[serde(default = "default_standard_working_days")]
    pub standard_working_days: u32,
}

impl StatutoryRates {
    /// The Mali rates: INPS 3.6%/16.4%, AMO 3.06%/3.5%, TL 1%, TFP 2%,
    /// ATEJ 2%, CFE 3.5%, transport 10%, 26-day month.
    pub fn mali_defaults() -> Self {
        Self {
            inps: ContributionRates {
                employee: Decimal::new(36, 3),
                employer: Decimal::new(164, 3),
            },
            amo: ContributionRates {
                employee: Decimal::new(306, 4),
                employer: Decimal::new(35, 3),
            },
            labor_taxes: LaborTaxRates {
                tl: Decimal::new(1, 2),
                tfp: Decimal::new(2, 2),
                atej: Decimal::new(2, 2),
                cfe: Decimal::new(35, 3),
            },
            transport_allowance_rate: default_transport_allowance_rate(),
            standard_working_days: default_standard_working_days(),
        }
    }

    /// Checks that every rate is a fraction and the standard month is not empty.
    pub fn validate(&self) -> Result<(), String> {
        let rates = [
            ("inps.employee", self.inps.employee),
            ("inps.employer", self.inps.employer),
            ("amo.employee", self.amo.employee),
            ("amo.employer", self.amo.employer),
            ("labor_taxes.tl", self.labor_taxes.tl),
            ("labor_taxes.tfp", self.labor_taxes.tfp),
            ("labor_taxes.atej", self.labor_taxes.atej),
            ("labor_taxes.cfe", self.labor_taxes.cfe),
            ("transport_allowance_rate", self.transport_allowance_rate),
        ];

        for (name, rate) in rates {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(format!("{} must be between 0 and 1, got {}", name, rate));
            }
        }

        if self.standard_working_days == 0 {
            return Err("standard_working_days must be greater than zero".to_string());
        }

        Ok(())
    }
}

/// Bracket file structure from brackets.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct BracketsConfig {
    /// Brackets in ascending order.
    pub brackets: Vec<BracketDefinition>,
}

/// The complete payroll configuration.
///
/// An immutable snapshot: the tax engine and pipeline borrow it for the
/// duration of one computation. Administrative edits produce a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollConfig {
    /// Schedule metadata.
    metadata: ScheduleMetadata,
    /// Statutory contribution and tax rates.
    rates: StatutoryRates,
    /// Income tax brackets.
    tax_schedule: TaxSchedule,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(metadata: ScheduleMetadata, rates: StatutoryRates, tax_schedule: TaxSchedule) -> Self {
        Self {
            metadata,
            rates,
            tax_schedule,
        }
    }

    /// The built-in Mali configuration (2019 bracket table).
    pub fn mali_defaults() -> Self {
        Self::new(
            ScheduleMetadata {
                code: "ML".to_string(),
                name: "Mali payroll schedule".to_string(),
                currency: "XOF".to_string(),
                version: "2019".to_string(),
            },
            StatutoryRates::mali_defaults(),
            TaxSchedule::mali_2019(),
        )
    }

    /// Returns a copy of this configuration using another bracket table.
    pub fn with_tax_schedule(&self, tax_schedule: TaxSchedule) -> Self {
        Self {
            metadata: self.metadata.clone(),
            rates: self.rates.clone(),
            tax_schedule,
        }
    }

    /// Returns the schedule metadata.
    pub fn metadata(&self) -> &ScheduleMetadata {
        &self.metadata
    }

    /// Returns the statutory rates.
    pub fn rates(&self) -> &StatutoryRates {
        &self.rates
    }

    /// Returns the income tax brackets.
    pub fn tax_schedule(&self) -> &TaxSchedule {
        &self.tax_schedule
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
    fn test_mali_default_rates() {
        let rates = StatutoryRates::mali_defaults();
        assert_eq!(rates.inps.employee, dec("0.036"));
        assert_eq!(rates.inps.employer, dec("0.164"));
        assert_eq!(rates.amo.employee, dec("0.0306"));
        assert_eq!(rates.amo.employer, dec("0.035"));
        assert_eq!(rates.labor_taxes.cfe, dec("0.035"));
        assert_eq!(rates.transport_allowance_rate, dec("0.10"));
        assert_eq!(rates.standard_working_days, 26);
        assert!(rates.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_rate_above_one() {
        let mut rates = StatutoryRates::mali_defaults();
        rates.labor_taxes.tfp = dec("2");
        let message = rates.validate().unwrap_err();
        assert!(message.contains("labor_taxes.tfp"));
    }

    #[test]
    fn test_validate_rejects_zero_day_month() {
        let mut rates = StatutoryRates::mali_defaults();
        rates.standard_working_days = 0;
        assert!(rates.validate().is_err());
    }

    #[test]
    fn test_rates_yaml_defaults_optional_fields() {
        let yaml = r#"
inps: { employee: "0.036", employer: "0.164" }
amo: { employee: "0.0306", employer: "0.035" }
labor_taxes: { tl: "0.01", tfp: "0.02", atej: "0.02", cfe: "0.035" }
"#;
        let rates: StatutoryRates = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(rates, StatutoryRates::mali_defaults());
    }

    #[test]
    fn test_with_tax_schedule_keeps_rates() {
        let config = PayrollConfig::mali_defaults();
        let edited_schedule = config
            .tax_schedule()
            .with_rates(&[dec("0"), dec("0.05"), dec("0.10"), dec("0.15"), dec("0.20"), dec("0.25"), dec("0.30")])
            .unwrap();

        let edited = config.with_tax_schedule(edited_schedule.clone());
        assert_eq!(edited.tax_schedule(), &edited_schedule);
        assert_eq!(edited.rates(), config.rates());
        assert_eq!(edited.metadata(), config.metadata());
    }
}
