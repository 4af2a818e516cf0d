//! Runtime-replaceable configuration.
//!
//! [`ConfigStore`] hands out immutable [`PayrollConfig`] snapshots. An
//! administrative edit swaps in a new snapshot; computations already holding
//! the previous one finish with it unchanged.

use std::sync::{Arc, PoisonError, RwLock};

use rust_decimal::Decimal;
use tracing::info;

use crate::error::EngineResult;
use crate::models::TaxSchedule;

use super::types::PayrollConfig;

/// Shared holder of the current configuration snapshot.
///
/// Cloning the store shares the same underlying snapshot slot.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    current: Arc<RwLock<Arc<PayrollConfig>>>,
}

impl ConfigStore {
    /// Creates a store holding the given configuration.
    pub fn new(config: PayrollConfig) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(config))),
        }
    }

    /// The configuration current at call time.
    pub fn snapshot(&self) -> Arc<PayrollConfig> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replaces the whole configuration.
    pub fn replace(&self, config: PayrollConfig) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(config);
    }

    /// Replaces the bracket table, keeping the statutory rates.
    pub fn replace_tax_schedule(&self, tax_schedule: TaxSchedule) -> Arc<PayrollConfig> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let updated = Arc::new(guard.with_tax_schedule(tax_schedule));
        *guard = Arc::clone(&updated);

        info!(
            brackets = updated.tax_schedule().brackets().len(),
            "Replaced tax schedule"
        );
        updated
    }

    /// Applies edited bracket rates to the current table.
    ///
    /// Bounds are kept; cumulative tax is recomputed. The current snapshot is
    /// left untouched if the rates are rejected.
    pub fn update_tax_rates(&self, rates: &[Decimal]) -> EngineResult<Arc<PayrollConfig>> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let tax_schedule = guard.tax_schedule().with_rates(rates)?;
        let updated = Arc::new(guard.with_tax_schedule(tax_schedule));
        *guard = Arc::clone(&updated);

        info!(rates = rates.len(), "Updated tax bracket rates");
        Ok(updated)
    }
}
