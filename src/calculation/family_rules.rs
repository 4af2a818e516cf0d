//! Family allowance and family tax reduction lookups.
//!
//! Both rules are step functions over the number of dependents, with
//! separate thresholds for single and married employees. Unrecognised status
//! codes resolve to a zero-effect default instead of failing, so a garbled
//! code never blocks a payroll run.

use rust_decimal::Decimal;

use crate::models::{FamilyStatus, MaritalStatus};

/// Monthly family allowance for a parsed status.
///
/// | Status | Dependents | Allowance |
/// |--------|-----------|-----------|
/// | Single | 0–1 | 15 000 |
/// | Single | 2–4 | 25 000 |
/// | Single | 5+ | 35 000 |
/// | Married | 0–2 | 25 000 |
/// | Married | 3–4 | 35 000 |
/// | Married | 5–7 | 45 000 |
/// | Married | 8+ | 55 000 |
pub fn allowance_for(status: FamilyStatus) -> Decimal {
    let amount = match (status.marital_status, status.dependents) {
        (MaritalStatus::Single, 0..=1) => 15_000,
        (MaritalStatus::Single, 2..=4) => 25_000,
        (MaritalStatus::Single, _) => 35_000,
        (MaritalStatus::Married, 0..=2) => 25_000,
        (MaritalStatus::Married, 3..=4) => 35_000,
        (MaritalStatus::Married, 5..=7) => 45_000,
        (MaritalStatus::Married, _) => 55_000,
    };
    Decimal::from(amount)
}

/// Fraction by which annual taxable income is reduced for a parsed status.
///
/// Counts above the last listed range get no reduction.
///
/// | Status | Dependents | Reduction |
/// |--------|-----------|-----------|
/// | Single | 0–4 | 0% |
/// | Single | 5–9 | 10% |
/// | Single | 10–15 | 15% |
/// | Married | 0–4 | 10% |
/// | Married | 5–9 | 20% |
/// | Married | 10–20 | 25% |
pub fn reduction_for(status: FamilyStatus) -> Decimal {
    let percent = match (status.marital_status, status.dependents) {
        (MaritalStatus::Single, 0..=4) => 0,
        (MaritalStatus::Single, 5..=9) => 10,
        (MaritalStatus::Single, 10..=15) => 15,
        (MaritalStatus::Married, 0..=4) => 10,
        (MaritalStatus::Married, 5..=9) => 20,
        (MaritalStatus::Married, 10..=20) => 25,
        _ => 0,
    };
    Decimal::new(percent, 2)
}

/// Family allowance for a raw status code; zero when the code is malformed.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::family_allowance;
/// use rust_decimal::Decimal;
///
/// assert_eq!(family_allowance("C0"), Decimal::from(15000));
/// assert_eq!(family_allowance("M08"), Decimal::from(55000));
/// assert_eq!(family_allowance("??"), Decimal::ZERO);
/// ```
pub fn family_allowance(status_code: &str) -> Decimal {
    FamilyStatus::parse(status_code)
        .map(allowance_for)
        .unwrap_or(Decimal::ZERO)
}

/// Tax-base reduction fraction for a raw status code; zero when malformed.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::family_reduction_fraction;
/// use rust_decimal::Decimal;
///
/// assert_eq!(family_reduction_fraction("M5"), Decimal::new(20, 2));
/// assert_eq!(family_reduction_fraction("C16"), Decimal::ZERO);
/// ```
pub fn family_reduction_fraction(status_code: &str) -> Decimal {
    FamilyStatus::parse(status_code)
        .map(reduction_for)
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_single_allowance_steps() {
        assert_eq!(family_allowance("C0"), dec("15000"));
        assert_eq!(family_allowance("C1"), dec("15000"));
        assert_eq!(family_allowance("C2"), dec("25000"));
        assert_eq!(family_allowance("C4"), dec("25000"));
        assert_eq!(family_allowance("C5"), dec("35000"));
        assert_eq!(family_allowance("C30"), dec("35000"));
    }

    #[test]
    fn test_married_allowance_steps() {
        assert_eq!(family_allowance("M0"), dec("25000"));
        assert_eq!(family_allowance("M2"), dec("25000"));
        assert_eq!(family_allowance("M3"), dec("35000"));
        assert_eq!(family_allowance("M4"), dec("35000"));
        assert_eq!(family_allowance("M5"), dec("45000"));
        assert_eq!(family_allowance("M7"), dec("45000"));
        assert_eq!(family_allowance("M8"), dec("55000"));
        assert_eq!(family_allowance("M12"), dec("55000"));
    }

    #[test]
    fn test_single_reduction_steps() {
        assert_eq!(family_reduction_fraction("C0"), dec("0"));
        assert_eq!(family_reduction_fraction("C4"), dec("0"));
        assert_eq!(family_reduction_fraction("C5"), dec("0.10"));
        assert_eq!(family_reduction_fraction("C9"), dec("0.10"));
        assert_eq!(family_reduction_fraction("C10"), dec("0.15"));
        assert_eq!(family_reduction_fraction("C15"), dec("0.15"));
        assert_eq!(family_reduction_fraction("C16"), dec("0"));
    }

    #[test]
    fn test_married_reduction_steps() {
        assert_eq!(family_reduction_fraction("M0"), dec("0.10"));
        assert_eq!(family_reduction_fraction("M4"), dec("0.10"));
        assert_eq!(family_reduction_fraction("M5"), dec("0.20"));
        assert_eq!(family_reduction_fraction("M9"), dec("0.20"));
        assert_eq!(family_reduction_fraction("M10"), dec("0.25"));
        assert_eq!(family_reduction_fraction("M20"), dec("0.25"));
        assert_eq!(family_reduction_fraction("M21"), dec("0"));
    }

    #[test]
    fn test_malformed_codes_resolve_to_zero() {
        for code in ["", " ", "X1", "C", "Mx", "CM2", "1C", "M-3"] {
            assert_eq!(family_allowance(code), Decimal::ZERO, "code {:?}", code);
            assert_eq!(
                family_reduction_fraction(code),
                Decimal::ZERO,
                "code {:?}",
                code
            );
        }
    }

    #[test]
    fn test_lookup_normalises_case_and_padding() {
        assert_eq!(family_allowance(" m08 "), dec("55000"));
        assert_eq!(family_reduction_fraction("c12"), dec("0.15"));
    }
}
