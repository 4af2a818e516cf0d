//! Family status codes.
//!
//! Employees carry a status code of the form `<letter><integer>` where the
//! letter is `C` (single) or `M` (married) and the integer is the number of
//! dependents, e.g. `C0` or `M08`.

use serde::{Deserialize, Serialize};

/// Marital status encoded by the first letter of a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    /// `C` (célibataire).
    Single,
    /// `M` (marié).
    Married,
}

/// A parsed status code.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{FamilyStatus, MaritalStatus};
///
/// let status = FamilyStatus::parse(" m08 ").unwrap();
/// assert_eq!(status.marital_status, MaritalStatus::Married);
/// assert_eq!(status.dependents, 8);
///
/// assert!(FamilyStatus::parse("X2").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyStatus {
    /// Single or married.
    pub marital_status: MaritalStatus,
    /// Number of dependents.
    pub dependents: u32,
}

impl FamilyStatus {
    /// Parses a status code, ignoring surrounding whitespace and letter case.
    ///
    /// Returns `None` for an empty code, an unknown letter, or a suffix that
    /// is not a non-negative integer.
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim();
        let mut chars = code.chars();
        let letter = chars.next()?;

        let marital_status = match letter.to_ascii_uppercase() {
            'C' => MaritalStatus::Single,
            'M' => MaritalStatus::Married,
            _ => return None,
        };

        let dependents = chars.as_str().trim().parse::<u32>().ok()?;

        Some(Self {
            marital_status,
            dependents,
        })
    }
}
