//! Whole-period recomputation and summaries.
//!
//! Each employee is read, computed and written independently. A failure for
//! one employee is recorded in the [`BatchReport`] and the run continues.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{PayrollResult, PeriodSummary};
use crate::repository::{PayrollInputSource, PayrollResultSink, UpsertOutcome};

use super::pipeline::PayrollPipeline;

/// One employee the batch could not process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// Identifier of the employee.
    pub employee_id: String,
    /// Why the employee was skipped.
    pub message: String,
}

/// Outcome of a period recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// The period recomputed.
    pub period_id: u64,
    /// Employees whose record was written.
    pub succeeded: Vec<String>,
    /// Employees that failed, with the reason.
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    /// Whether every employee was processed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Validates, computes and upserts one employee's result for a period.
pub fn calculate_employee<S>(
    config: &PayrollConfig,
    store: &S,
    period_id: u64,
    employee_id: &str,
) -> EngineResult<(PayrollResult, UpsertOutcome)>
where
    S: PayrollInputSource + PayrollResultSink + ?Sized,
{
    let input = store.load_input(period_id, employee_id)?;
    input.validate()?;

    let result = PayrollPipeline::new(config).calculate(&input);
    let outcome = store.upsert_result(period_id, &result)?;
    Ok((result, outcome))
}

/// Recomputes every employee registered for a period.
///
/// # Errors
///
/// Fails as a whole only when the period is unknown, finalized or its
/// employee list cannot be read; per-employee errors land in the report.
pub fn calculate_period<S>(
    config: &PayrollConfig,
    store: &S,
    period_id: u64,
) -> EngineResult<BatchReport>
where
    S: PayrollInputSource + PayrollResultSink + ?Sized,
{
    let period = store.get_period(period_id)?;
    if period.finalized {
        return Err(EngineError::PeriodFinalized { period_id });
    }

    let employees = store.employees_in_period(period_id)?;
    let mut report = BatchReport {
        period_id,
        succeeded: Vec::with_capacity(employees.len()),
        failures: Vec::new(),
    };

    for employee_id in employees {
        match calculate_employee(config, store, period_id, &employee_id) {
            Ok(_) => report.succeeded.push(employee_id),
            Err(err) => {
                warn!(
                    period_id,
                    employee_id = %employee_id,
                    error = %err,
                    "Skipping employee in period recomputation"
                );
                report.failures.push(BatchFailure {
                    employee_id,
                    message: err.to_string(),
                });
            }
        }
    }

    info!(
        period_id,
        period = %period.label(),
        succeeded = report.succeeded.len(),
        failed = report.failures.len(),
        "Recomputed payroll period"
    );

    Ok(report)
}

/// Totals of a period's stored records.
pub fn summarize_period<S>(store: &S, period_id: u64) -> EngineResult<PeriodSummary>
where
    S: PayrollResultSink + ?Sized,
{
    let records = store.records_for_period(period_id)?;
    Ok(PeriodSummary::from_results(
        period_id,
        records.iter().map(|record| &record.result),
    ))
}
