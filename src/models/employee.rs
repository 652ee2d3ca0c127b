//! Employee record model.
//!
//! This module defines the [`EmployeeRecord`] struct, one parsed row of
//! payroll input.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

/// A single employee's payroll input for one pay period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Employee number. Not required to be unique within a batch.
    pub id: u32,
    /// Employee name.
    pub name: String,
    /// Date of birth. Carried through for display only.
    pub birthdate: NaiveDate,
    /// Hours worked in the period.
    pub hours_worked: u32,
    /// Gross salary for the period.
    pub gross_salary: Decimal,
}

impl EmployeeRecord {
    /// Creates a validated employee record.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the id is zero, the name is blank or the
    /// gross salary is negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::EmployeeRecord;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let record = EmployeeRecord::new(
    ///     10001,
    ///     "Garcia, Manuel",
    ///     NaiveDate::from_ymd_opt(1983, 10, 11).unwrap(),
    ///     160,
    ///     Decimal::new(90000, 0),
    /// )
    /// .unwrap();
    /// assert_eq!(record.name, "Garcia, Manuel");
    ///
    /// assert!(EmployeeRecord::new(
    ///     10002,
    ///     "Lim, Antonio",
    ///     NaiveDate::from_ymd_opt(1988, 6, 19).unwrap(),
    ///     160,
    ///     Decimal::new(-1, 0),
    /// )
    /// .is_err());
    /// ```
    pub fn new(
        id: u32,
        name: impl Into<String>,
        birthdate: NaiveDate,
        hours_worked: u32,
        gross_salary: Decimal,
    ) -> PayrollResult<Self> {
        let name = name.into();

        if id == 0 {
            return Err(PayrollError::InvalidInput {
                field: "id".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }
        if name.trim().is_empty() {
            return Err(PayrollError::InvalidInput {
                field: "name".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if gross_salary < Decimal::ZERO {
            return Err(PayrollError::InvalidInput {
                field: "gross_salary".to_string(),
                message: format!("must not be negative, got {}", gross_salary),
            });
        }

        Ok(Self {
            id,
            name,
            birthdate,
            hours_worked,
            gross_salary,
        })
    }
}
