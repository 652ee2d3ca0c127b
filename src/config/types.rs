//! Configuration types for payroll deductions.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML schedule file, along with the built-in
//! default schedule.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The source name used when none is given.
pub const DEFAULT_SOURCE_PATH: &str = "employee_data.xlsx";

/// A flat, salary-independent contribution withheld from every employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    /// The name of the contribution (e.g., "SSS").
    pub name: String,
    /// The amount withheld per pay period.
    pub amount: Decimal,
}

/// One row of the withholding tax table.
///
/// Tax for a salary inside this bracket is
/// `base_tax + (gross - floor) * rate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Inclusive upper bound of the bracket, or `None` for the top bracket.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    /// The amount subtracted from gross salary before applying the rate.
    pub floor: Decimal,
    /// Tax owed at the floor.
    pub base_tax: Decimal,
    /// Marginal rate applied to the excess over the floor.
    pub rate: Decimal,
}

impl TaxBracket {
    /// Returns true if the salary does not exceed this bracket's upper bound.
    pub fn contains(&self, gross_salary: Decimal) -> bool {
        self.upper_bound.is_none_or(|bound| gross_salary <= bound)
    }
}

/// The full deduction schedule: fixed contributions and the tax table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionSchedule {
    /// Fixed contributions, applied in order.
    pub contributions: Vec<Contribution>,
    /// Tax brackets in ascending order of upper bound.
    pub brackets: Vec<TaxBracket>,
}

impl DeductionSchedule {
    /// Returns the sum of all fixed contributions.
    pub fn contributions_total(&self) -> Decimal {
        self.contributions.iter().map(|c| c.amount).sum()
    }
}

impl Default for DeductionSchedule {
    /// The standard schedule: three 200.00 contributions and the six-bracket
    /// withholding table.
    fn default() -> Self {
        let contribution = |name: &str| Contribution {
            name: name.to_string(),
            amount: Decimal::new(200, 0),
        };
        let bracket = |upper_bound: Option<i64>, floor: i64, base_tax: Decimal, rate: i64| {
            TaxBracket {
                upper_bound: upper_bound.map(|b| Decimal::new(b, 0)),
                floor: Decimal::new(floor, 0),
                base_tax,
                rate: Decimal::new(rate, 2),
            }
        };

        Self {
            contributions: vec![
                contribution("SSS"),
                contribution("PhilHealth"),
                contribution("Pag-IBIG"),
            ],
            brackets: vec![
                bracket(Some(20_832), 0, Decimal::ZERO, 0),
                // The floor of 20,833 is one above the previous bound in the
                // published table and is kept as-is.
                bracket(Some(33_333), 20_833, Decimal::ZERO, 20),
                bracket(Some(66_667), 33_333, Decimal::new(2_500, 0), 25),
                bracket(Some(166_667), 66_667, Decimal::new(10_833, 0), 30),
                bracket(Some(666_667), 166_667, Decimal::new(4_083_333, 2), 32),
                bracket(None, 666_667, Decimal::new(20_083_333, 2), 35),
            ],
        }
    }
}

/// Everything a batch run needs, passed explicitly rather than read from globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollConfig {
    /// Location of the record source.
    pub source_path: PathBuf,
    /// The deduction schedule to apply.
    pub schedule: DeductionSchedule,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
            schedule: DeductionSchedule::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_contributions_total_600() {
        let schedule = DeductionSchedule::default();
        assert_eq!(schedule.contributions.len(), 3);
        assert_eq!(schedule.contributions_total(), dec("600.00"));
    }

    #[test]
    fn test_default_brackets_match_published_table() {
        let brackets = DeductionSchedule::default().brackets;
        assert_eq!(brackets.len(), 6);

        assert_eq!(brackets[0].upper_bound, Some(dec("20832")));
        assert_eq!(brackets[1].floor, dec("20833"));
        assert_eq!(brackets[1].rate, dec("0.20"));
        assert_eq!(brackets[2].base_tax, dec("2500"));
        assert_eq!(brackets[3].base_tax, dec("10833"));
        assert_eq!(brackets[4].base_tax, dec("40833.33"));
        assert_eq!(brackets[4].rate, dec("0.32"));
        assert_eq!(brackets[5].upper_bound, None);
        assert_eq!(brackets[5].base_tax, dec("200833.33"));
        assert_eq!(brackets[5].rate, dec("0.35"));
    }

    #[test]
    fn test_bracket_upper_bound_is_inclusive() {
        let bracket = &DeductionSchedule::default().brackets[0];
        assert!(bracket.contains(dec("20832.00")));
        assert!(!bracket.contains(dec("20832.01")));
    }

    #[test]
    fn test_unbounded_bracket_contains_everything() {
        let bracket = &DeductionSchedule::default().brackets[5];
        assert!(bracket.contains(dec("99999999999.99")));
    }

    #[test]
    fn test_default_payroll_config_uses_default_source() {
        let config = PayrollConfig::default();
        assert_eq!(config.source_path, PathBuf::from("employee_data.xlsx"));
        assert_eq!(config.schedule, DeductionSchedule::default());
    }

    #[test]
    fn test_deserialize_bracket_without_upper_bound() {
        let yaml = r#"
floor: "666667"
base_tax: "200833.33"
rate: "0.35"
"#;
        let bracket: TaxBracket = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(bracket.upper_bound, None);
        assert_eq!(bracket.rate, dec("0.35"));
    }
}
