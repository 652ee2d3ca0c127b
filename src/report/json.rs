//! JSON lines report.

use std::io::Write;

use serde::Serialize;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{AuditStep, PayBreakdown};

use super::{ReportSink, round_money};

#[derive(Serialize)]
struct JsonLine<'a> {
    employee_number: u32,
    employee_name: &'a str,
    birthday: String,
    hours_worked: u32,
    gross_salary: String,
    contributions_total: String,
    withholding_tax: String,
    tax_bracket: usize,
    total_deductions: String,
    net_pay: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    audit_steps: Option<&'a [AuditStep]>,
}

/// Writes one JSON object per employee, one per line.
#[derive(Debug)]
pub struct JsonLinesReport<W: Write> {
    writer: W,
    include_audit: bool,
}

impl<W: Write> JsonLinesReport<W> {
    /// Creates a report writing to `writer`, without audit steps.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            include_audit: false,
        }
    }

    /// Includes each breakdown's audit steps in its line.
    pub fn with_audit(mut self) -> Self {
        self.include_audit = true;
        self
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for JsonLinesReport<W> {
    fn emit(&mut self, breakdown: &PayBreakdown) -> PayrollResult<()> {
        let employee = &breakdown.employee;
        let line = JsonLine {
            employee_number: employee.id,
            employee_name: &employee.name,
            birthday: employee.birthdate.to_string(),
            hours_worked: employee.hours_worked,
            gross_salary: round_money(breakdown.gross_salary).to_string(),
            contributions_total: round_money(breakdown.deductions.contributions_total).to_string(),
            withholding_tax: round_money(breakdown.deductions.withholding_tax).to_string(),
            tax_bracket: breakdown.deductions.tax_bracket,
            total_deductions: round_money(breakdown.total_deductions).to_string(),
            net_pay: round_money(breakdown.net_pay).to_string(),
            audit_steps: self
                .include_audit
                .then_some(breakdown.deductions.audit_steps.as_slice()),
        };

        let write_err = |message: String| PayrollError::ReportWrite { message };
        serde_json::to_writer(&mut self.writer, &line).map_err(|e| write_err(e.to_string()))?;
        writeln!(self.writer).map_err(|e| write_err(e.to_string()))
    }

    fn finish(&mut self) -> PayrollResult<()> {
        self.writer.flush().map_err(|e| PayrollError::ReportWrite {
            message: e.to_string(),
        })
    }
}
