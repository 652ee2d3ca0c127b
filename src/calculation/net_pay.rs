//! Net pay calculation.

use crate::config::DeductionSchedule;
use crate::error::PayrollResult;
use crate::models::{EmployeeRecord, PayBreakdown};

use super::deductions::calculate_deductions;

/// Computes the pay breakdown for one employee.
///
/// Net pay is gross salary less total deductions. It is not clamped, so a
/// salary below the fixed contributions yields a negative net pay.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_pay;
/// use payroll_engine::config::DeductionSchedule;
/// use payroll_engine::models::EmployeeRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let record = EmployeeRecord::new(
///     10001,
///     "Garcia, Manuel",
///     NaiveDate::from_ymd_opt(1983, 10, 11).unwrap(),
///     160,
///     Decimal::new(33333, 0),
/// )
/// .unwrap();
///
/// let breakdown = calculate_pay(&record, &DeductionSchedule::default()).unwrap();
/// assert_eq!(breakdown.total_deductions, Decimal::new(3100, 0));
/// assert_eq!(breakdown.net_pay, Decimal::new(30233, 0));
/// ```
pub fn calculate_pay(
    record: &EmployeeRecord,
    schedule: &DeductionSchedule,
) -> PayrollResult<PayBreakdown> {
    let deductions = calculate_deductions(record.gross_salary, schedule)?;

    Ok(PayBreakdown {
        employee: record.clone(),
        gross_salary: record.gross_salary,
        total_deductions: deductions.total,
        net_pay: record.gross_salary - deductions.total,
        deductions,
    })
}
