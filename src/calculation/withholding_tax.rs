//! Withholding tax calculation functionality.
//!
//! This module computes progressive withholding tax from a bracket table.
//!
//! ## Bracket Structure
//!
//! Brackets are checked in ascending order and the first whose upper bound
//! is not exceeded applies. Tax inside a bracket is
//! `base_tax + (gross - floor) * rate`, clamped at zero. Amounts are not
//! rounded here.

use rust_decimal::Decimal;

use crate::config::TaxBracket;
use crate::error::{PayrollError, PayrollResult};
use crate::models::AuditStep;

/// The result of a withholding tax calculation.
#[derive(Debug, Clone)]
pub struct TaxResult {
    /// The tax owed, never negative.
    pub tax: Decimal,
    /// One-based index of the bracket that applied.
    pub bracket_index: usize,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates withholding tax on a gross salary.
///
/// # Arguments
///
/// * `gross_salary` - The gross salary for the period
/// * `brackets` - The tax table, in ascending order of upper bound
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns `InvalidInput` for a negative salary, and `InvalidSchedule` if no
/// bracket covers the salary (only possible when the top bracket is bounded).
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_withholding_tax;
/// use payroll_engine::config::DeductionSchedule;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let schedule = DeductionSchedule::default();
///
/// let result = calculate_withholding_tax(Decimal::from_str("20000").unwrap(), &schedule.brackets, 1).unwrap();
/// assert_eq!(result.tax, Decimal::ZERO);
/// assert_eq!(result.bracket_index, 1);
///
/// let result = calculate_withholding_tax(Decimal::from_str("33333").unwrap(), &schedule.brackets, 1).unwrap();
/// assert_eq!(result.tax, Decimal::from_str("2500").unwrap());
/// assert_eq!(result.bracket_index, 2);
/// ```
pub fn calculate_withholding_tax(
    gross_salary: Decimal,
    brackets: &[TaxBracket],
    step_number: u32,
) -> PayrollResult<TaxResult> {
    if gross_salary < Decimal::ZERO {
        return Err(PayrollError::InvalidInput {
            field: "gross_salary".to_string(),
            message: format!("must not be negative, got {}", gross_salary),
        });
    }

    let (index, bracket) = brackets
        .iter()
        .enumerate()
        .find(|(_, b)| b.contains(gross_salary))
        .ok_or_else(|| PayrollError::InvalidSchedule {
            message: format!("no tax bracket covers gross salary {}", gross_salary),
        })?;

    let excess = gross_salary - bracket.floor;
    let tax = (bracket.base_tax + excess * bracket.rate).max(Decimal::ZERO);
    let bracket_index = index + 1;

    let upper_bound = bracket
        .upper_bound
        .map_or_else(|| "none".to_string(), |b| b.to_string());

    let audit_step = AuditStep {
        step_number,
        rule_id: "withholding_tax".to_string(),
        rule_name: "Withholding Tax".to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.to_string(),
            "bracket": bracket_index,
            "upper_bound": upper_bound,
            "floor": bracket.floor.to_string(),
            "base_tax": bracket.base_tax.to_string(),
            "rate": bracket.rate.to_string()
        }),
        output: serde_json::json!({
            "tax": tax.normalize().to_string()
        }),
        reasoning: format!(
            "Bracket {}: {} + ({} - {}) x {} = {}",
            bracket_index,
            bracket.base_tax.normalize(),
            gross_salary.normalize(),
            bracket.floor.normalize(),
            bracket.rate.normalize(),
            tax.normalize()
        ),
    };

    Ok(TaxResult {
        tax,
        bracket_index,
        audit_step,
    })
}
