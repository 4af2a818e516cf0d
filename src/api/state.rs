//! Application state for the payroll API.

use std::sync::Arc;

use crate::config::{ConfigStore, PayrollConfig};
use crate::repository::{InMemoryPayrollStore, PayrollStore};

/// Shared application state.
///
/// Holds the replaceable configuration and the payroll store. Each handler
/// takes one configuration snapshot and uses it for the whole request.
#[derive(Clone)]
pub struct AppState {
    config: ConfigStore,
    store: Arc<dyn PayrollStore>,
}

impl AppState {
    /// Creates a state over an existing configuration store and payroll store.
    pub fn new(config: ConfigStore, store: Arc<dyn PayrollStore>) -> Self {
        Self { config, store }
    }

    /// Creates a state with the given configuration and an empty in-memory store.
    pub fn in_memory(config: PayrollConfig) -> Self {
        Self::new(
            ConfigStore::new(config),
            Arc::new(InMemoryPayrollStore::new()),
        )
    }

    /// Returns the configuration store.
    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// Returns the payroll store.
    pub fn store(&self) -> &dyn PayrollStore {
        self.store.as_ref()
    }
}
