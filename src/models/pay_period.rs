//! Payroll period model.
//!
//! This module contains the [`PayrollPeriod`] type that scopes stored payroll
//! records and batch recomputation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A monthly payroll period.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayrollPeriod::new(
///     1,
///     NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
/// );
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()));
/// assert_eq!(period.label(), "2026-01");
/// assert!(!period.finalized);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// Identifier of the period.
    pub period_id: u64,
    /// First day of the period (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the period (inclusive).
    pub end_date: NaiveDate,
    /// A finalized period is closed to recomputation.
    #[serde(default)]
    pub finalized: bool,
}

impl PayrollPeriod {
    /// Creates an open period.
    pub fn new(period_id: u64, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            period_id,
            start_date,
            end_date,
            finalized: false,
        }
    }

    /// Checks if a given date falls within this period, inclusive of both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Year and month of the start date, formatted `YYYY-MM`.
    pub fn label(&self) -> String {
        self.start_date.format("%Y-%m").to_string()
    }
}
