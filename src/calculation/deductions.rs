//! Deduction aggregation.
//!
//! Total deductions are the schedule's fixed contributions plus the
//! withholding tax on the gross salary.

use rust_decimal::Decimal;

use crate::config::DeductionSchedule;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{AuditStep, ContributionLine, DeductionBreakdown};

use super::withholding_tax::calculate_withholding_tax;

/// Calculates everything withheld from a gross salary.
///
/// Audit steps are numbered from 1: one per contribution in schedule order,
/// then the withholding tax step.
///
/// # Errors
///
/// Returns `InvalidInput` if `gross_salary` is negative.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_deductions;
/// use payroll_engine::config::DeductionSchedule;
/// use rust_decimal::Decimal;
///
/// let result = calculate_deductions(Decimal::new(20000, 0), &DeductionSchedule::default()).unwrap();
/// assert_eq!(result.withholding_tax, Decimal::ZERO);
/// assert_eq!(result.total, Decimal::new(600, 0));
/// ```
pub fn calculate_deductions(
    gross_salary: Decimal,
    schedule: &DeductionSchedule,
) -> PayrollResult<DeductionBreakdown> {
    if gross_salary < Decimal::ZERO {
        return Err(PayrollError::InvalidInput {
            field: "gross_salary".to_string(),
            message: format!("must not be negative, got {}", gross_salary),
        });
    }

    let mut audit_steps = Vec::with_capacity(schedule.contributions.len() + 1);
    let mut step_number: u32 = 1;

    let contributions: Vec<ContributionLine> = schedule
        .contributions
        .iter()
        .map(|contribution| {
            audit_steps.push(AuditStep {
                step_number,
                rule_id: "fixed_contribution".to_string(),
                rule_name: format!("{} Contribution", contribution.name),
                input: serde_json::json!({ "contribution": contribution.name }),
                output: serde_json::json!({ "amount": contribution.amount.to_string() }),
                reasoning: format!(
                    "Flat {} contribution of {}",
                    contribution.name,
                    contribution.amount.normalize()
                ),
            });
            step_number += 1;

            ContributionLine {
                name: contribution.name.clone(),
                amount: contribution.amount,
            }
        })
        .collect();

    let contributions_total: Decimal = contributions.iter().map(|c| c.amount).sum();

    let tax_result = calculate_withholding_tax(gross_salary, &schedule.brackets, step_number)?;
    audit_steps.push(tax_result.audit_step);

    Ok(DeductionBreakdown {
        contributions,
        contributions_total,
        withholding_tax: tax_result.tax,
        tax_bracket: tax_result.bracket_index,
        total: contributions_total + tax_result.tax,
        audit_steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Contribution;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_salary_in_first_bracket_pays_contributions_only() {
        let result = calculate_deductions(dec("20000.00"), &DeductionSchedule::default()).unwrap();

        assert_eq!(result.contributions_total, dec("600.00"));
        assert_eq!(result.withholding_tax, Decimal::ZERO);
        assert_eq!(result.total, dec("600.00"));
        assert_eq!(result.tax_bracket, 1);
    }

    #[test]
    fn test_salary_at_second_bracket_bound() {
        let result = calculate_deductions(dec("33333.00"), &DeductionSchedule::default()).unwrap();

        assert_eq!(result.withholding_tax, dec("2500.00"));
        assert_eq!(result.total, dec("3100.00"));
    }

    #[test]
    fn test_contribution_lines_follow_schedule_order() {
        let result = calculate_deductions(dec("1000"), &DeductionSchedule::default()).unwrap();
        let names: Vec<&str> = result.contributions.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(names, vec!["SSS", "PhilHealth", "Pag-IBIG"]);
        assert!(result.contributions.iter().all(|c| c.amount == dec("200")));
    }

    #[test]
    fn test_custom_contributions_are_used() {
        let mut schedule = DeductionSchedule::default();
        schedule.contributions = vec![Contribution {
            name: "Union".to_string(),
            amount: dec("125.50"),
        }];

        let result = calculate_deductions(dec("20000"), &schedule).unwrap();
        assert_eq!(result.total, dec("125.50"));
    }

    #[test]
    fn test_audit_steps_numbered_contributions_then_tax() {
        let result = calculate_deductions(dec("50000"), &DeductionSchedule::default()).unwrap();
        let steps = &result.audit_steps;

        assert_eq!(steps.len(), 4);
        assert_eq!(
            steps.iter().map(|s| s.step_number).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
        assert_eq!(steps[0].rule_id, "fixed_contribution");
        assert_eq!(steps[1].rule_name, "PhilHealth Contribution");
        assert_eq!(steps[3].rule_id, "withholding_tax");
    }

    #[test]
    fn test_negative_salary_rejected() {
        match calculate_deductions(dec("-100"), &DeductionSchedule::default()) {
            Err(PayrollError::InvalidInput { field, .. }) => assert_eq!(field, "gross_salary"),
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    proptest! {
        #[test]
        fn prop_total_is_contributions_plus_tax(cents in 0i64..=200_000_000) {
            let schedule = DeductionSchedule::default();
            let gross = Decimal::new(cents, 2);
            let result = calculate_deductions(gross, &schedule).unwrap();

            prop_assert_eq!(result.total, dec("600.00") + result.withholding_tax);
            prop_assert!(result.total >= schedule.contributions_total());
        }
    }
}
