//! Calculation logic for the payroll engine.
//!
//! This module contains the progressive income tax engine, the family status
//! lookups, the pipeline stages that turn a monthly input into a payroll
//! result (attendance, allowances, contributions), the pipeline itself, and
//! whole-period recomputation.

mod allowances;
mod attendance;
mod batch;
mod contributions;
mod family_rules;
mod pipeline;
mod rounding;
mod tax_engine;

pub use allowances::{
    ALLOWANCES_RULE_ID, AllowanceAggregationResult, AllowanceBreakdown, aggregate_allowances,
};
pub use attendance::{ATTENDANCE_RULE_ID, AttendanceAdjustment, adjust_base_salary};
pub use batch::{BatchFailure, BatchReport, calculate_employee, calculate_period, summarize_period};
pub use contributions::{LaborTaxes, SocialContributions, contribution_base};
pub use family_rules::{allowance_for, family_allowance, family_reduction_fraction, reduction_for};
pub use pipeline::{
    ABSENCE_EXCEEDS_MONTH, ATTENDANCE_MISMATCH, PayrollPipeline, TRANSPORT_DEFAULTED,
    UNRECOGNISED_STATUS_CODE,
};
pub use rounding::{CURRENCY_DECIMAL_PLACES, round_currency};
pub use tax_engine::{TaxBreakdown, TaxEngine};
