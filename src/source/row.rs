//! Raw rows and their conversion into employee records.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{RowError, RowErrorKind};
use crate::models::EmployeeRecord;

/// Format of the birthdate column.
pub const BIRTHDATE_FORMAT: &str = "%m-%d-%Y";

const COL_ID: &str = "employee_number";
const COL_NAME: &str = "employee_name";
const COL_BIRTHDATE: &str = "birthday";
const COL_HOURS: &str = "hours_worked";
const COL_GROSS: &str = "gross_salary";

/// One unparsed data row from a record source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// Data row number, counting from 1 (the header is row 0).
    pub position: usize,
    /// Cell contents, positional.
    pub cells: Vec<String>,
}

impl RawRow {
    /// Creates a row from anything yielding cell strings.
    pub fn new<I, S>(position: usize, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            position,
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    fn cell(&self, index: usize, column: &'static str) -> Result<&str, RowError> {
        self.cells
            .get(index)
            .map(|c| c.trim())
            .ok_or_else(|| RowError::new(self.position, RowErrorKind::MissingCell { column }))
    }

    fn number(&self, index: usize, column: &'static str) -> Result<Decimal, RowError> {
        let value = self.cell(index, column)?;
        ungroup_thousands(value)
            .and_then(|plain| Decimal::from_str(&plain).ok())
            .ok_or_else(|| {
                RowError::new(
                    self.position,
                    RowErrorKind::InvalidNumber {
                        column,
                        value: value.to_string(),
                    },
                )
            })
    }

    fn invalid(&self, field: &str, message: impl Into<String>) -> RowError {
        RowError::new(
            self.position,
            RowErrorKind::InvalidInput {
                field: field.to_string(),
                message: message.into(),
            },
        )
    }
}

/// Removes thousands separators from a numeric cell ("90,000.00").
///
/// Commas are only accepted between groups of three digits in the integer
/// part, with a leading group of one to three digits. Any other comma makes
/// the cell unparseable, so `1234,56` is rejected rather than read as 123456.
fn ungroup_thousands(value: &str) -> Option<String> {
    if !value.contains(',') {
        return Some(value.to_string());
    }

    let unsigned = value.trim_start_matches(['-', '+']);
    let sign = &value[..value.len() - unsigned.len()];
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    if fraction.is_some_and(|f| f.contains(',')) || sign.len() > 1 {
        return None;
    }

    let mut groups = integer.split(',');
    let leading = groups.next()?;
    let all_digits = |g: &str| g.bytes().all(|b| b.is_ascii_digit());
    if leading.is_empty() || leading.len() > 3 || !all_digits(leading) {
        return None;
    }
    if !groups.all(|g| g.len() == 3 && all_digits(g)) {
        return None;
    }

    let mut plain = format!("{}{}", sign, integer.replace(',', ""));
    if let Some(fraction) = fraction {
        plain.push('.');
        plain.push_str(fraction);
    }
    Some(plain)
}

/// Parses a row into an [`EmployeeRecord`].
///
/// Columns are positional: employee number, name, birthdate (`MM-DD-YYYY`),
/// hours worked, gross salary. Numeric employee numbers and hours are
/// truncated toward zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::source::{RawRow, parse_record};
/// use rust_decimal::Decimal;
///
/// let row = RawRow::new(1, ["10001", "Garcia, Manuel", "10-11-1983", "160", "90000"]);
/// let record = parse_record(&row).unwrap();
/// assert_eq!(record.id, 10001);
/// assert_eq!(record.gross_salary, Decimal::new(90000, 0));
///
/// let bad = RawRow::new(2, ["10002", "Lim, Antonio", "19-06-1988", "160", "60000"]);
/// assert!(parse_record(&bad).is_err());
/// ```
pub fn parse_record(row: &RawRow) -> Result<EmployeeRecord, RowError> {
    let id = row.number(0, COL_ID)?;
    let name = row.cell(1, COL_NAME)?;
    let birthdate_cell = row.cell(2, COL_BIRTHDATE)?;
    let hours = row.number(3, COL_HOURS)?;
    let gross_salary = row.number(4, COL_GROSS)?;

    if name.is_empty() {
        return Err(RowError::new(row.position, RowErrorKind::EmptyName));
    }

    let birthdate = NaiveDate::parse_from_str(birthdate_cell, BIRTHDATE_FORMAT).map_err(|_| {
        RowError::new(
            row.position,
            RowErrorKind::InvalidDate {
                value: birthdate_cell.to_string(),
            },
        )
    })?;

    let id = id
        .trunc()
        .to_u32()
        .filter(|id| *id > 0)
        .ok_or_else(|| row.invalid("id", format!("must be a positive integer, got {}", id)))?;

    if hours < Decimal::ZERO {
        return Err(row.invalid("hours_worked", format!("must not be negative, got {}", hours)));
    }
    let hours_worked = hours
        .trunc()
        .to_u32()
        .ok_or_else(|| row.invalid("hours_worked", format!("out of range: {}", hours)))?;

    EmployeeRecord::new(id, name, birthdate, hours_worked, gross_salary)
        .map_err(|e| RowError::from((row.position, e)))
}
