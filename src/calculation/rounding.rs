//! Currency rounding policy.
//!
//! Every rounded figure in the engine goes through [`round_currency`]:
//!
//! | Figure | Rounded when |
//! |--------|--------------|
//! | Annual tax | After summing all bracket slices |
//! | Monthly tax | After dividing the rounded annual tax by 12 |
//! | Result fields | Each one once, from its own unrounded formula, at assembly |
//!
//! Intermediate pipeline values (adjusted base, contribution base, social
//! contributions, net figures) stay unrounded until assembly.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places of every currency amount.
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// Rounds to two decimal places, midpoints away from zero.
///
/// Exact half-cents go up in magnitude (`0.125` becomes `0.13`). Reports
/// produced with banker's rounding can differ by one cent on such values.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
///
/// assert_eq!(round_currency(dec("159082.650833")), dec("159082.65"));
/// assert_eq!(round_currency(dec("0.125")), dec("0.13"));
/// assert_eq!(round_currency(dec("-0.125")), dec("-0.13"));
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        CURRENCY_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    )
}
