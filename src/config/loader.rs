//! Schedule loading functionality.
//!
//! This module provides the [`ScheduleLoader`] type for loading a deduction
//! schedule from a YAML file and checking that it is usable.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;

use crate::error::{PayrollError, PayrollResult};

use super::types::DeductionSchedule;

/// Loads and validates deduction schedules.
///
/// # File Format
///
/// ```text
/// contributions:
///   - name: SSS
///     amount: "200.00"
/// brackets:
///   - upper_bound: "20832"
///     floor: "0"
///     base_tax: "0"
///     rate: "0"
///   - floor: "666667"        # no upper_bound: top bracket
///     base_tax: "200833.33"
///     rate: "0.35"
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ScheduleLoader;
///
/// let schedule = ScheduleLoader::load("./config/schedule.yaml")?;
/// println!("{} brackets", schedule.brackets.len());
/// # Ok::<(), payroll_engine::error::PayrollError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ScheduleLoader;

impl ScheduleLoader {
    /// Loads a schedule from the given YAML file.
    ///
    /// # Returns
    ///
    /// Returns the schedule on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file is not valid YAML for a schedule (`ConfigParseError`)
    /// - The schedule fails validation (`InvalidSchedule`)
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<DeductionSchedule> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            PayrollError::ConfigParseError { message, .. } => PayrollError::ConfigParseError {
                path: path_str,
                message,
            },
            other => other,
        })
    }

    /// Parses and validates a schedule from YAML text.
    pub fn parse(content: &str) -> PayrollResult<DeductionSchedule> {
        let schedule: DeductionSchedule =
            serde_yaml::from_str(content).map_err(|e| PayrollError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;

        Self::validate(&schedule)?;
        Ok(schedule)
    }

    /// Checks the structural rules every schedule must satisfy.
    pub fn validate(schedule: &DeductionSchedule) -> PayrollResult<()> {
        let invalid = |message: String| Err(PayrollError::InvalidSchedule { message });

        for contribution in &schedule.contributions {
            if contribution.amount < Decimal::ZERO {
                return invalid(format!(
                    "contribution '{}' has negative amount {}",
                    contribution.name, contribution.amount
                ));
            }
        }

        let Some((last, rest)) = schedule.brackets.split_last() else {
            return invalid("at least one tax bracket is required".to_string());
        };

        if last.upper_bound.is_some() {
            return invalid("the last bracket must have no upper bound".to_string());
        }

        let mut previous: Option<Decimal> = None;
        for (index, bracket) in rest.iter().enumerate() {
            let Some(bound) = bracket.upper_bound else {
                return invalid(format!("bracket {} is unbounded but not last", index + 1));
            };
            if previous.is_some_and(|p| bound <= p) {
                return invalid(format!(
                    "bracket {} upper bound {} is not above the previous bound",
                    index + 1,
                    bound
                ));
            }
            previous = Some(bound);
        }

        for (index, bracket) in schedule.brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.base_tax < Decimal::ZERO {
                return invalid(format!(
                    "bracket {} has a negative rate or base tax",
                    index + 1
                ));
            }
        }

        Ok(())
    }
}
