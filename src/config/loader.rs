//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a payroll
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::TaxSchedule;

use super::types::{BracketsConfig, PayrollConfig, ScheduleMetadata, StatutoryRates};

/// Loads a payroll configuration from a directory.
///
/// # Directory Structure
///
/// ```text
/// config/mali/
/// ├── schedule.yaml   # Country, currency and version
/// ├── rates.yaml      # Social contribution and labor tax rates
/// └── brackets.yaml   # Income tax brackets, ascending
/// ```
///
/// Brackets are validated and their cumulative tax derived here, once,
/// so the tax engine never re-checks them on the hot path.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/mali")?;
/// println!("Loaded schedule: {}", loader.config().metadata().name);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML or an out-of-range rate
    /// - The brackets are not contiguous, ascending and topped by one
    ///   unbounded bracket
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<ScheduleMetadata>(&path.join("schedule.yaml"))?;

        let rates_path = path.join("rates.yaml");
        let rates = Self::load_yaml::<StatutoryRates>(&rates_path)?;
        rates
            .validate()
            .map_err(|message| EngineError::ConfigParseError {
                path: rates_path.display().to_string(),
                message,
            })?;

        let brackets = Self::load_yaml::<BracketsConfig>(&path.join("brackets.yaml"))?;
        let tax_schedule = TaxSchedule::new(brackets.brackets)?;

        info!(
            path = %path.display(),
            code = %metadata.code,
            version = %metadata.version,
            brackets = tax_schedule.brackets().len(),
            "Loaded payroll configuration"
        );

        Ok(Self {
            config: PayrollConfig::new(metadata, rates, tax_schedule),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> PayrollConfig {
        self.config
    }
}
