//! Pay breakdown models for the Payroll Engine.
//!
//! This module contains the [`PayBreakdown`] type and its associated structures
//! that capture all outputs from a net pay calculation, including the
//! contribution lines, withholding tax and an audit trail of each rule applied.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EmployeeRecord;

/// A single step in the audit trail recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// One fixed contribution as withheld from an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionLine {
    /// The contribution name (e.g., "PhilHealth").
    pub name: String,
    /// The amount withheld.
    pub amount: Decimal,
}

/// Everything withheld from a gross salary.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_deductions;
/// use payroll_engine::config::DeductionSchedule;
/// use rust_decimal::Decimal;
///
/// let deductions =
///     calculate_deductions(Decimal::new(33333, 0), &DeductionSchedule::default()).unwrap();
/// assert_eq!(deductions.contributions_total, Decimal::new(600, 0));
/// assert_eq!(deductions.withholding_tax, Decimal::new(2500, 0));
/// assert_eq!(deductions.total, Decimal::new(3100, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    /// Each fixed contribution, in schedule order.
    pub contributions: Vec<ContributionLine>,
    /// Sum of the fixed contributions.
    pub contributions_total: Decimal,
    /// Withholding tax owed.
    pub withholding_tax: Decimal,
    /// One-based index of the tax bracket that applied.
    pub tax_bracket: usize,
    /// Contributions plus withholding tax.
    pub total: Decimal,
    /// Audit trail of the contribution and tax rules applied.
    pub audit_steps: Vec<AuditStep>,
}

/// The computed pay for one employee.
///
/// `net_pay` is always `gross_salary - total_deductions`. Amounts are kept
/// unrounded; rounding happens once when the breakdown is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayBreakdown {
    /// The record this breakdown was computed from.
    pub employee: EmployeeRecord,
    /// Gross salary, copied from the record.
    pub gross_salary: Decimal,
    /// Total amount withheld.
    pub total_deductions: Decimal,
    /// Gross salary less total deductions.
    pub net_pay: Decimal,
    /// Itemised deductions.
    pub deductions: DeductionBreakdown,
}
