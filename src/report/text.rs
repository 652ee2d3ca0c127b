//! Plain text report.

use std::io::Write;

use crate::error::{PayrollError, PayrollResult};
use crate::models::PayBreakdown;

use super::{ReportSink, round_money};

/// Line written after each employee block.
pub const SEPARATOR: &str = "-------------------------------";

/// Writes one human-readable block per employee.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_pay;
/// use payroll_engine::config::DeductionSchedule;
/// use payroll_engine::models::EmployeeRecord;
/// use payroll_engine::report::{ReportSink, TextReport};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let record = EmployeeRecord::new(
///     10001,
///     "Garcia, Manuel",
///     NaiveDate::from_ymd_opt(1983, 10, 11).unwrap(),
///     160,
///     Decimal::new(20000, 0),
/// )
/// .unwrap();
/// let breakdown = calculate_pay(&record, &DeductionSchedule::default()).unwrap();
///
/// let mut report = TextReport::new(Vec::new());
/// report.emit(&breakdown).unwrap();
/// let text = String::from_utf8(report.into_inner()).unwrap();
/// assert!(text.contains("Net Pay: 19400.00"));
/// ```
#[derive(Debug)]
pub struct TextReport<W: Write> {
    writer: W,
}

impl<W: Write> TextReport<W> {
    /// Creates a report writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_block(&mut self, breakdown: &PayBreakdown) -> std::io::Result<()> {
        let employee = &breakdown.employee;
        let w = &mut self.writer;

        writeln!(w, "Employee Number: {}", employee.id)?;
        writeln!(w, "Employee Name: {}", employee.name)?;
        writeln!(w, "Birthday: {}", employee.birthdate)?;
        writeln!(w, "Hours Worked: {}", employee.hours_worked)?;
        writeln!(w, "Gross Salary: {}", round_money(breakdown.gross_salary))?;
        writeln!(w, "Total Deductions: {}", round_money(breakdown.total_deductions))?;
        writeln!(w, "Net Pay: {}", round_money(breakdown.net_pay))?;
        writeln!(w, "{}", SEPARATOR)
    }
}

impl<W: Write> ReportSink for TextReport<W> {
    fn emit(&mut self, breakdown: &PayBreakdown) -> PayrollResult<()> {
        self.write_block(breakdown)
            .map_err(|e| PayrollError::ReportWrite {
                message: e.to_string(),
            })
    }

    fn finish(&mut self) -> PayrollResult<()> {
        self.writer.flush().map_err(|e| PayrollError::ReportWrite {
            message: e.to_string(),
        })
    }
}
