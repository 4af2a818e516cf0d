//! Configuration loading and management for the payroll engine.
//!
//! This module provides functionality to load the statutory schedule from
//! YAML files (metadata, contribution and labor tax rates, income tax
//! brackets) and to replace it at runtime after an administrative edit.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::{ConfigLoader, ConfigStore};
//!
//! let config = ConfigLoader::load("./config/mali").unwrap().into_config();
//! let store = ConfigStore::new(config);
//! println!("Loaded schedule: {}", store.snapshot().metadata().name);
//! ```

mod loader;
mod store;
mod types;

pub use loader::ConfigLoader;
pub use store::ConfigStore;
pub use types::{
    BracketsConfig, ContributionRates, LaborTaxRates, PayrollConfig, ScheduleMetadata,
    StatutoryRates,
};
