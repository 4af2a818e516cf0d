//! Attendance adjustment of the base salary.
//!
//! Unpaid absences are deducted from the contractual base at a daily rate of
//! `base / standard_days`. The adjusted base never drops below zero, however
//! many absences are recorded.

use rust_decimal::Decimal;

use crate::models::AuditStep;

/// Rule identifier recorded in the audit trace.
pub const ATTENDANCE_RULE_ID: &str = "attendance_adjustment";

/// The base salary after attendance, with its audit step.
#[derive(Debug, Clone)]
pub struct AttendanceAdjustment {
    /// Base salary divided by the standard month.
    pub daily_rate: Decimal,
    /// Amount withheld for absences, before clamping.
    pub absence_deduction: Decimal,
    /// Base salary after the deduction, never negative.
    pub adjusted_base: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Deducts unpaid absences from the base salary.
///
/// The deduction is computed as `base × days_absent / standard_days`, which
/// equals `daily_rate × days_absent` without the intermediate rounding error
/// of a repeating daily rate. With no absences the base is returned as is.
///
/// # Arguments
///
/// * `base_salary` - The contractual monthly base salary
/// * `days_worked` - Days worked, recorded in the audit step only
/// * `days_absent` - Unpaid days of absence
/// * `standard_days` - Working days in a standard month (26)
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::adjust_base_salary;
/// use rust_decimal::Decimal;
///
/// let adjustment = adjust_base_salary(Decimal::from(500000), 13, 13, 26, 1);
/// assert_eq!(adjustment.adjusted_base, Decimal::from(250000));
///
/// let clamped = adjust_base_salary(Decimal::from(500000), 0, 40, 26, 1);
/// assert_eq!(clamped.adjusted_base, Decimal::ZERO);
/// ```
pub fn adjust_base_salary(
    base_salary: Decimal,
    days_worked: u32,
    days_absent: u32,
    standard_days: u32,
    step_number: u32,
) -> AttendanceAdjustment {
    let standard = Decimal::from(standard_days);
    let daily_rate = base_salary.checked_div(standard).unwrap_or(Decimal::ZERO);

    let (absence_deduction, adjusted_base) = if days_absent == 0 || standard_days == 0 {
        (Decimal::ZERO, base_salary)
    } else {
        let deduction = base_salary * Decimal::from(days_absent) / standard;
        (deduction, (base_salary - deduction).max(Decimal::ZERO))
    };

    let reasoning = if days_absent == 0 {
        "No absences recorded; base salary paid in full".to_string()
    } else if adjusted_base.is_zero() {
        format!(
            "{} days absent of a {}-day month; deduction {} exceeds base {}, adjusted base clamped to 0",
            days_absent,
            standard_days,
            absence_deduction.round_dp(2).normalize(),
            base_salary.normalize()
        )
    } else {
        format!(
            "{} × {} / {} = {} withheld for absences; adjusted base {}",
            base_salary.normalize(),
            days_absent,
            standard_days,
            absence_deduction.round_dp(2).normalize(),
            adjusted_base.round_dp(2).normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: ATTENDANCE_RULE_ID.to_string(),
        rule_name: "Attendance Adjustment".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.to_string(),
            "days_worked": days_worked,
            "days_absent": days_absent,
            "standard_days": standard_days
        }),
        output: serde_json::json!({
            "daily_rate": daily_rate.round_dp(2).to_string(),
            "absence_deduction": absence_deduction.round_dp(2).to_string(),
            "adjusted_base": adjusted_base.round_dp(2).to_string()
        }),
        reasoning,
    };

    AttendanceAdjustment {
        daily_rate,
        absence_deduction,
        adjusted_base,
        audit_step,
    }
}
