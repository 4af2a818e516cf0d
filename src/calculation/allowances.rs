//! Allowance aggregation.
//!
//! Fills the defaulted allowances (transport, family), passes the others
//! through and totals them.

use rust_decimal::Decimal;

use crate::models::{AuditStep, PayrollInput};

use super::family_rules::family_allowance;

/// Rule identifier recorded in the audit trace.
pub const ALLOWANCES_RULE_ID: &str = "allowance_aggregation";

/// Every allowance of the period, after defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowanceBreakdown {
    /// Transport allowance.
    pub transport: Decimal,
    /// Family allowance.
    pub family: Decimal,
    /// Responsibility allowance.
    pub responsibility: Decimal,
    /// Risk premium.
    pub risk: Decimal,
    /// Housing allowance.
    pub housing: Decimal,
    /// Overtime pay.
    pub overtime: Decimal,
    /// Bonus.
    pub bonus: Decimal,
    /// Special allowance (1973).
    pub special_1973: Decimal,
    /// Cost-of-living allowance (1974).
    pub cost_of_living_1974: Decimal,
    /// Sum of all of the above.
    pub total: Decimal,
    /// Whether transport was computed from the adjusted base.
    pub transport_defaulted: bool,
    /// Whether family was looked up from the status code.
    pub family_defaulted: bool,
}

impl AllowanceBreakdown {
    /// Allowances that enter the INPS/AMO contribution base.
    ///
    /// Responsibility, risk, housing, overtime and bonus are excluded.
    pub fn contribution_eligible(&self) -> Decimal {
        self.transport + self.family + self.special_1973 + self.cost_of_living_1974
    }
}

/// The aggregated allowances with the audit step.
#[derive(Debug, Clone)]
pub struct AllowanceAggregationResult {
    /// The allowances after defaults.
    pub allowances: AllowanceBreakdown,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Aggregates the allowances of one input.
///
/// An unset transport allowance defaults to `transport_rate` of the adjusted
/// base; an unset family allowance defaults to the status-code lookup.
/// Explicit zeros are kept.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::aggregate_allowances;
/// use payroll_engine::models::PayrollInput;
/// use rust_decimal::Decimal;
///
/// let input = PayrollInput {
///     status_code: "C0".to_string(),
///     ..PayrollInput::new("EMP-001", Decimal::from(500000))
/// };
///
/// let result = aggregate_allowances(&input, Decimal::from(500000), Decimal::new(10, 2), 2);
/// assert_eq!(result.allowances.transport, Decimal::from(50000));
/// assert_eq!(result.allowances.family, Decimal::from(15000));
/// assert_eq!(result.allowances.total, Decimal::from(65000));
/// ```
pub fn aggregate_allowances(
    input: &PayrollInput,
    adjusted_base: Decimal,
    transport_rate: Decimal,
    step_number: u32,
) -> AllowanceAggregationResult {
    let (transport, transport_defaulted) = match input.transport_allowance {
        Some(amount) => (amount, false),
        None => (adjusted_base * transport_rate, true),
    };
    let (family, family_defaulted) = match input.family_allowance {
        Some(amount) => (amount, false),
        None => (family_allowance(&input.status_code), true),
    };

    let total = transport
        + family
        + input.responsibility_allowance
        + input.risk_allowance
        + input.housing_allowance
        + input.overtime_amount
        + input.bonus_amount
        + input.special_allowance_1973
        + input.cost_of_living_1974;

    let allowances = AllowanceBreakdown {
        transport,
        family,
        responsibility: input.responsibility_allowance,
        risk: input.risk_allowance,
        housing: input.housing_allowance,
        overtime: input.overtime_amount,
        bonus: input.bonus_amount,
        special_1973: input.special_allowance_1973,
        cost_of_living_1974: input.cost_of_living_1974,
        total,
        transport_defaulted,
        family_defaulted,
    };

    let mut notes = Vec::new();
    if transport_defaulted {
        notes.push(format!(
            "transport defaulted to {} of adjusted base",
            transport_rate.normalize()
        ));
    }
    if family_defaulted {
        notes.push(format!(
            "family allowance looked up for status '{}'",
            input.status_code
        ));
    }
    let reasoning = if notes.is_empty() {
        format!("All allowances supplied; total {}", total.round_dp(2).normalize())
    } else {
        format!(
            "Total allowances {} ({})",
            total.round_dp(2).normalize(),
            notes.join("; ")
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: ALLOWANCES_RULE_ID.to_string(),
        rule_name: "Allowance Aggregation".to_string(),
        input: serde_json::json!({
            "adjusted_base": adjusted_base.round_dp(2).to_string(),
            "status_code": input.status_code,
            "transport_supplied": !transport_defaulted,
            "family_supplied": !family_defaulted
        }),
        output: serde_json::json!({
            "transport": transport.round_dp(2).to_string(),
            "family": family.round_dp(2).to_string(),
            "total_allowances": total.round_dp(2).to_string(),
            "contribution_eligible": allowances.contribution_eligible().round_dp(2).to_string()
        }),
        reasoning,
    };

    AllowanceAggregationResult {
        allowances,
        audit_step,
    }
}
