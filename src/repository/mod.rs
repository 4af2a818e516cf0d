//! Persistence contracts for payroll data.
//!
//! The engine reads periods and inputs through [`PayrollInputSource`] and
//! writes results through [`PayrollResultSink`]. A store guarantees at most
//! one record per (employee, period): writing a result for a pair that
//! already has one replaces it.

mod memory;

pub use memory::InMemoryPayrollStore;

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{PayrollInput, PayrollPeriod, PayrollRecord, PayrollResult};

/// What an upsert did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UpsertOutcome {
    /// A new record was created.
    Inserted {
        /// Identifier of the new record.
        record_id: u64,
    },
    /// An existing record for the same employee and period was replaced.
    Updated {
        /// Identifier of the replaced record.
        record_id: u64,
    },
}

impl UpsertOutcome {
    /// Identifier of the record written.
    pub fn record_id(&self) -> u64 {
        match self {
            Self::Inserted { record_id } | Self::Updated { record_id } => *record_id,
        }
    }
}

/// Source of periods, enrolled employees and their inputs.
pub trait PayrollInputSource: Send + Sync {
    /// Looks up a period.
    fn get_period(&self, period_id: u64) -> EngineResult<PayrollPeriod>;

    /// Employees registered for a period, in enrolment order.
    fn employees_in_period(&self, period_id: u64) -> EngineResult<Vec<String>>;

    /// The input of one employee for one period.
    fn load_input(&self, period_id: u64, employee_id: &str) -> EngineResult<PayrollInput>;
}

/// Sink for computed results.
pub trait PayrollResultSink: Send + Sync {
    /// Inserts or replaces the record of `result.employee_id` for the period.
    ///
    /// Fails with [`EngineError::PeriodFinalized`](crate::error::EngineError::PeriodFinalized)
    /// once the period is closed.
    fn upsert_result(&self, period_id: u64, result: &PayrollResult) -> EngineResult<UpsertOutcome>;

    /// Every stored record of a period.
    fn records_for_period(&self, period_id: u64) -> EngineResult<Vec<PayrollRecord>>;
}

/// A store that is both a source and a sink.
pub trait PayrollStore: PayrollInputSource + PayrollResultSink {}

impl<T: PayrollInputSource + PayrollResultSink + ?Sized> PayrollStore for T {}
