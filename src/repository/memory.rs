//! In-memory payroll store.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{PayrollInput, PayrollPeriod, PayrollRecord, PayrollResult};

use super::{PayrollInputSource, PayrollResultSink, UpsertOutcome};

#[derive(Debug, Default)]
struct StoreState {
    periods: BTreeMap<u64, PayrollPeriod>,
    enrolments: BTreeMap<u64, Vec<String>>,
    inputs: HashMap<(u64, String), PayrollInput>,
    records: HashMap<(u64, String), PayrollRecord>,
    next_record_id: u64,
}

impl StoreState {
    fn period(&self, period_id: u64) -> EngineResult<&PayrollPeriod> {
        self.periods
            .get(&period_id)
            .ok_or(EngineError::PeriodNotFound { period_id })
    }

    fn open_period(&self, period_id: u64) -> EngineResult<&PayrollPeriod> {
        let period = self.period(period_id)?;
        if period.finalized {
            return Err(EngineError::PeriodFinalized { period_id });
        }
        Ok(period)
    }
}

/// A [`PayrollStore`](super::PayrollStore) held in process memory.
///
/// Backs the HTTP service and the tests. Records are keyed by
/// (period, employee), so recomputing an employee replaces their record and
/// keeps its id.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use payroll_engine::models::{PayrollInput, PayrollPeriod};
/// use payroll_engine::repository::{InMemoryPayrollStore, PayrollInputSource};
/// use rust_decimal::Decimal;
///
/// let store = InMemoryPayrollStore::new();
/// store.add_period(PayrollPeriod::new(
///     1,
///     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
/// ))?;
/// store.enroll(1, PayrollInput::new("EMP-001", Decimal::from(300000)))?;
///
/// assert_eq!(store.employees_in_period(1)?, vec!["EMP-001".to_string()]);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Default)]
pub struct InMemoryPayrollStore {
    state: RwLock<StoreState>,
}

impl InMemoryPayrollStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> EngineResult<RwLockReadGuard<'_, StoreState>> {
        self.state.read().map_err(|_| EngineError::StorageError {
            message: "payroll store lock poisoned".to_string(),
        })
    }

    fn write(&self) -> EngineResult<RwLockWriteGuard<'_, StoreState>> {
        self.state.write().map_err(|_| EngineError::StorageError {
            message: "payroll store lock poisoned".to_string(),
        })
    }

    /// Adds or replaces a period.
    pub fn add_period(&self, period: PayrollPeriod) -> EngineResult<()> {
        let mut state = self.write()?;
        state.enrolments.entry(period.period_id).or_default();
        state.periods.insert(period.period_id, period);
        Ok(())
    }

    /// Registers an employee for a period and stores their input.
    ///
    /// Enrolling the same employee again replaces the input.
    pub fn enroll(&self, period_id: u64, input: PayrollInput) -> EngineResult<()> {
        let mut state = self.write()?;
        state.open_period(period_id)?;

        let employee_id = input.employee_id.clone();
        let enrolled = state.enrolments.entry(period_id).or_default();
        if !enrolled.contains(&employee_id) {
            enrolled.push(employee_id.clone());
        }
        state.inputs.insert((period_id, employee_id), input);
        Ok(())
    }

    /// Closes a period; later upserts and batch runs are refused.
    pub fn finalize_period(&self, period_id: u64) -> EngineResult<()> {
        let mut state = self.write()?;
        let period = state
            .periods
            .get_mut(&period_id)
            .ok_or(EngineError::PeriodNotFound { period_id })?;
        period.finalized = true;
        Ok(())
    }
}

impl PayrollInputSource for InMemoryPayrollStore {
    fn get_period(&self, period_id: u64) -> EngineResult<PayrollPeriod> {
        self.read()?.period(period_id).cloned()
    }

    fn employees_in_period(&self, period_id: u64) -> EngineResult<Vec<String>> {
        let state = self.read()?;
        state.period(period_id)?;
        Ok(state
            .enrolments
            .get(&period_id)
            .cloned()
            .unwrap_or_default())
    }

    fn load_input(&self, period_id: u64, employee_id: &str) -> EngineResult<PayrollInput> {
        let state = self.read()?;
        state.period(period_id)?;
        state
            .inputs
            .get(&(period_id, employee_id.to_string()))
            .cloned()
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }
}

impl PayrollResultSink for InMemoryPayrollStore {
    fn upsert_result(&self, period_id: u64, result: &PayrollResult) -> EngineResult<UpsertOutcome> {
        let mut guard = self.write()?;
        let state = &mut *guard;
        state.open_period(period_id)?;

        let key = (period_id, result.employee_id.clone());
        let outcome = match state.records.get_mut(&key) {
            Some(record) => {
                record.result = result.clone();
                UpsertOutcome::Updated {
                    record_id: record.record_id,
                }
            }
            None => {
                state.next_record_id += 1;
                let record_id = state.next_record_id;
                state.records.insert(
                    key,
                    PayrollRecord {
                        record_id,
                        period_id,
                        result: result.clone(),
                    },
                );
                UpsertOutcome::Inserted { record_id }
            }
        };

        debug!(
            period_id,
            employee_id = %result.employee_id,
            record_id = outcome.record_id(),
            "Upserted payroll record"
        );
        Ok(outcome)
    }

    fn records_for_period(&self, period_id: u64) -> EngineResult<Vec<PayrollRecord>> {
        let state = self.read()?;
        state.period(period_id)?;

        let mut records: Vec<PayrollRecord> = state
            .records
            .values()
            .filter(|record| record.period_id == period_id)
            .cloned()
            .collect();
        records.sort_by_key(|record| record.record_id);
        Ok(records)
    }
}
