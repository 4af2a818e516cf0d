//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine and its collaborators can report.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// The arithmetic core is infallible; these errors come from configuration
/// loading, boundary validation and the persistence contracts.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/rates.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/rates.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The tax bracket schedule violates its structural invariants.
    #[error("Invalid tax schedule: {message}")]
    InvalidTaxSchedule {
        /// A description of the violated invariant.
        message: String,
    },

    /// A payroll input field failed boundary validation.
    #[error("Invalid payroll input field '{field}': {message}")]
    InvalidPayrollInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No employee record exists for the identifier.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The employee identifier that was not found.
        employee_id: String,
    },

    /// No payroll period exists for the identifier.
    #[error("Payroll period not found: {period_id}")]
    PeriodNotFound {
        /// The period identifier that was not found.
        period_id: u64,
    },

    /// The payroll period is finalized and can no longer be written.
    #[error("Payroll period {period_id} is finalized")]
    PeriodFinalized {
        /// The finalized period identifier.
        period_id: u64,
    },

    /// The storage collaborator failed.
    #[error("Storage error: {message}")]
    StorageError {
        /// A description of the storage failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/brackets.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/brackets.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_tax_schedule_displays_message() {
        let error = EngineError::InvalidTaxSchedule {
            message: "bracket 2 does not start at 578401".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid tax schedule: bracket 2 does not start at 578401"
        );
    }

    #[test]
    fn test_invalid_payroll_input_displays_field_and_message() {
        let error = EngineError::InvalidPayrollInput {
            field: "base_salary".to_string(),
            message: "must not be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid payroll input field 'base_salary': must not be negative"
        );
    }

    #[test]
    fn test_lookup_errors_display_identifiers() {
        let employee = EngineError::EmployeeNotFound {
            employee_id: "EMP-404".to_string(),
        };
        assert_eq!(employee.to_string(), "Employee not found: EMP-404");

        let period = EngineError::PeriodNotFound { period_id: 7 };
        assert_eq!(period.to_string(), "Payroll period not found: 7");

        let finalized = EngineError::PeriodFinalized { period_id: 3 };
        assert_eq!(finalized.to_string(), "Payroll period 3 is finalized");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_storage_error() -> EngineResult<()> {
            Err(EngineError::StorageError {
                message: "disk full".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_storage_error()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
