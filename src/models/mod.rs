//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod family_status;
mod pay_period;
mod payroll_input;
mod period_summary;
mod tax_bracket;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, PayrollCalculation, PayrollResult,
};
pub use family_status::{FamilyStatus, MaritalStatus};
pub use pay_period::PayrollPeriod;
pub use payroll_input::{MAX_AMOUNT, PayrollInput};
pub use period_summary::{PayrollRecord, PeriodSummary};
pub use tax_bracket::{BracketDefinition, TaxBracket, TaxSchedule};
