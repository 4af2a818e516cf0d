//! Progressive tax brackets.
//!
//! A [`TaxSchedule`] is an immutable, validated snapshot of the bracket
//! table. Bracket bounds are inclusive on both ends, so the width of a
//! bounded bracket is `max_income - min_income + 1`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// One bracket as written in configuration, before cumulative tax is derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketDefinition {
    /// Inclusive lower bound.
    pub min_income: Decimal,
    /// Inclusive upper bound; `None` for the top bracket.
    #[serde(default)]
    pub max_income: Option<Decimal>,
    /// Marginal rate as a fraction between 0 and 1.
    pub rate: Decimal,
}

/// A bracket of the schedule.
///
/// `cumulative_tax` is the tax owed on all income strictly below
/// `min_income`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Inclusive lower bound.
    pub min_income: Decimal,
    /// Inclusive upper bound; `None` for the top bracket.
    pub max_income: Option<Decimal>,
    /// Marginal rate as a fraction between 0 and 1.
    pub rate: Decimal,
    /// Tax owed on all lower brackets.
    pub cumulative_tax: Decimal,
}

impl TaxBracket {
    /// Number of currency units covered by the bracket, `None` when unbounded.
    pub fn width(&self) -> Option<Decimal> {
        self.max_income
            .map(|max_income| max_income - self.min_income + Decimal::ONE)
    }

    /// Tax owed on the whole bracket, `None` when unbounded.
    pub fn full_tax(&self) -> Option<Decimal> {
        self.width().map(|width| width * self.rate)
    }
}

/// A validated, ordered bracket table.
///
/// # Example
///
/// ```
/// use payroll_engine::models::TaxSchedule;
/// use rust_decimal::Decimal;
///
/// let schedule = TaxSchedule::mali_2019();
/// let brackets = schedule.brackets();
///
/// assert_eq!(brackets.len(), 7);
/// assert_eq!(brackets[2].cumulative_tax, Decimal::from(12420));
/// assert!(brackets[6].max_income.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSchedule {
    brackets: Vec<TaxBracket>,
}

impl TaxSchedule {
    /// Validates the definitions and derives each bracket's cumulative tax.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTaxSchedule`] if:
    /// - No brackets are given
    /// - A rate lies outside `[0, 1]` or a lower bound is negative
    /// - A bounded bracket ends before it starts
    /// - A bracket does not start one unit after the previous one ends
    /// - Any bracket other than the last is unbounded, or the last is bounded
    pub fn new(definitions: Vec<BracketDefinition>) -> EngineResult<Self> {
        if definitions.is_empty() {
            return Err(invalid("at least one bracket is required"));
        }

        let last_index = definitions.len() - 1;
        for (index, definition) in definitions.iter().enumerate() {
            if definition.rate < Decimal::ZERO || definition.rate > Decimal::ONE {
                return Err(invalid(format!(
                    "bracket {} has rate {} outside [0, 1]",
                    index, definition.rate
                )));
            }
            if definition.min_income < Decimal::ZERO {
                return Err(invalid(format!(
                    "bracket {} starts at negative income {}",
                    index, definition.min_income
                )));
            }

            match (definition.max_income, index == last_index) {
                (None, true) => {}
                (None, false) => {
                    return Err(invalid(format!(
                        "bracket {} is unbounded but is not the top bracket",
                        index
                    )));
                }
                (Some(_), true) => {
                    return Err(invalid("the top bracket must be unbounded"));
                }
                (Some(max_income), false) => {
                    if max_income < definition.min_income {
                        return Err(invalid(format!(
                            "bracket {} ends at {} before it starts at {}",
                            index, max_income, definition.min_income
                        )));
                    }
                    let expected_next = max_income + Decimal::ONE;
                    let next = &definitions[index + 1];
                    if next.min_income != expected_next {
                        return Err(invalid(format!(
                            "bracket {} starts at {} but must start at {}",
                            index + 1,
                            next.min_income,
                            expected_next
                        )));
                    }
                }
            }
        }

        Ok(Self::assemble(definitions))
    }

    /// The 2019 Mali income tax table.
    pub fn mali_2019() -> Self {
        let bounds: [(i64, Option<i64>, i64); 7] = [
            (0, Some(330_000), 0),
            (330_001, Some(578_400), 5),
            (578_401, Some(1_176_400), 12),
            (1_176_401, Some(1_789_733), 18),
            (1_789_734, Some(2_384_195), 26),
            (2_384_196, Some(3_494_130), 31),
            (3_494_131, None, 37),
        ];

        let definitions = bounds
            .into_iter()
            .map(|(min_income, max_income, percent)| BracketDefinition {
                min_income: Decimal::from(min_income),
                max_income: max_income.map(Decimal::from),
                rate: Decimal::new(percent, 2),
            })
            .collect();

        Self::assemble(definitions)
    }

    /// Returns a new schedule with the same bounds and the given rates.
    ///
    /// Cumulative tax is recomputed for every bracket. Used when an
    /// administrator edits the rates of the current table.
    pub fn with_rates(&self, rates: &[Decimal]) -> EngineResult<Self> {
        if rates.len() != self.brackets.len() {
            return Err(invalid(format!(
                "expected {} rates, got {}",
                self.brackets.len(),
                rates.len()
            )));
        }

        let definitions = self
            .brackets
            .iter()
            .zip(rates)
            .map(|(bracket, rate)| BracketDefinition {
                min_income: bracket.min_income,
                max_income: bracket.max_income,
                rate: *rate,
            })
            .collect();

        Self::new(definitions)
    }

    /// The brackets in ascending order.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// The highest bracket whose lower bound does not exceed `income`.
    pub fn bracket_for(&self, income: Decimal) -> Option<&TaxBracket> {
        self.brackets
            .iter()
            .take_while(|bracket| bracket.min_income <= income)
            .last()
    }

    fn assemble(definitions: Vec<BracketDefinition>) -> Self {
        let mut cumulative_tax = Decimal::ZERO;
        let mut brackets = Vec::with_capacity(definitions.len());

        for definition in definitions {
            let bracket = TaxBracket {
                min_income: definition.min_income,
                max_income: definition.max_income,
                rate: definition.rate,
                cumulative_tax,
            };
            cumulative_tax += bracket.full_tax().unwrap_or(Decimal::ZERO);
            brackets.push(bracket);
        }

        Self { brackets }
    }
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidTaxSchedule {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn definition(min: &str, max: Option<&str>, rate: &str) -> BracketDefinition {
        BracketDefinition {
            min_income: dec(min),
            max_income: max.map(dec),
            rate: dec(rate),
        }
    }

    fn two_bracket_definitions() -> Vec<BracketDefinition> {
        vec![
            definition("0", Some("1000"), "0.10"),
            definition("1001", None, "0.20"),
        ]
    }

    #[test]
    fn test_mali_cumulative_tax_follows_inclusive_widths() {
        let schedule = TaxSchedule::mali_2019();
        let cumulative: Vec<Decimal> = schedule
            .brackets()
            .iter()
            .map(|b| b.cumulative_tax)
            .collect();

        assert_eq!(
            cumulative,
            vec![
                dec("0"),
                dec("0"),
                dec("12420"),
                dec("84180"),
                dec("194579.94"),
                dec("349140.06"),
                dec("693219.91"),
            ]
        );
    }

    #[test]
    fn test_cumulative_tax_invariant_holds_for_each_bracket() {
        let schedule = TaxSchedule::mali_2019();
        for pair in schedule.brackets().windows(2) {
            let expected = pair[0].cumulative_tax
                + (pair[0].max_income.unwrap() - pair[0].min_income + Decimal::ONE) * pair[0].rate;
            assert_eq!(pair[1].cumulative_tax, expected);
        }
    }

    #[test]
    fn test_mali_table_passes_validation() {
        let schedule = TaxSchedule::mali_2019();
        let definitions = schedule
            .brackets()
            .iter()
            .map(|b| BracketDefinition {
                min_income: b.min_income,
                max_income: b.max_income,
                rate: b.rate,
            })
            .collect();

        assert_eq!(TaxSchedule::new(definitions).unwrap(), schedule);
    }

    #[test]
    fn test_new_rejects_empty_schedule() {
        assert!(matches!(
            TaxSchedule::new(vec![]),
            Err(EngineError::InvalidTaxSchedule { .. })
        ));
    }

    #[test]
    fn test_new_rejects_gap_between_brackets() {
        let definitions = vec![
            definition("0", Some("1000"), "0.10"),
            definition("1002", None, "0.20"),
        ];

        match TaxSchedule::new(definitions) {
            Err(EngineError::InvalidTaxSchedule { message }) => {
                assert!(message.contains("must start at 1001"), "{}", message);
            }
            other => panic!("Expected InvalidTaxSchedule, got {:?}", other),
        }
    }

    #[test]
    fn test_new_rejects_overlapping_brackets() {
        let definitions = vec![
            definition("0", Some("1000"), "0.10"),
            definition("1000", None, "0.20"),
        ];
        assert!(TaxSchedule::new(definitions).is_err());
    }

    #[test]
    fn test_new_rejects_unbounded_bracket_before_top() {
        let definitions = vec![
            definition("0", None, "0.10"),
            definition("1001", None, "0.20"),
        ];
        assert!(TaxSchedule::new(definitions).is_err());
    }

    #[test]
    fn test_new_rejects_bounded_top_bracket() {
        let definitions = vec![
            definition("0", Some("1000"), "0.10"),
            definition("1001", Some("5000"), "0.20"),
        ];
        assert!(TaxSchedule::new(definitions).is_err());
    }

    #[test]
    fn test_new_rejects_rate_above_one() {
        let definitions = vec![definition("0", None, "1.5")];
        assert!(TaxSchedule::new(definitions).is_err());
    }

    #[test]
    fn test_with_rates_recomputes_cumulative_tax() {
        let schedule = TaxSchedule::new(two_bracket_definitions()).unwrap();
        assert_eq!(schedule.brackets()[1].cumulative_tax, dec("100.1"));

        let edited = schedule.with_rates(&[dec("0.05"), dec("0.30")]).unwrap();
        assert_eq!(edited.brackets()[0].rate, dec("0.05"));
        assert_eq!(edited.brackets()[1].rate, dec("0.30"));
        assert_eq!(edited.brackets()[1].cumulative_tax, dec("50.05"));
        assert_eq!(edited.brackets()[1].min_income, dec("1001"));
    }

    #[test]
    fn test_with_rates_rejects_wrong_rate_count() {
        let schedule = TaxSchedule::new(two_bracket_definitions()).unwrap();
        assert!(schedule.with_rates(&[dec("0.05")]).is_err());
    }

    #[test]
    fn test_bracket_for_selects_containing_bracket() {
        let schedule = TaxSchedule::mali_2019();

        assert_eq!(
            schedule.bracket_for(dec("330000")).unwrap().min_income,
            dec("0")
        );
        assert_eq!(
            schedule.bracket_for(dec("330001")).unwrap().min_income,
            dec("330001")
        );
        assert_eq!(
            schedule.bracket_for(dec("9000000")).unwrap().min_income,
            dec("3494131")
        );
    }

    #[test]
    fn test_deserialize_definition_without_max_income() {
        let yaml = "min_income: \"3494131\"\nrate: \"0.37\"\n";
        let definition: BracketDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(definition.max_income, None);
        assert_eq!(definition.rate, dec("0.37"));
    }
}
