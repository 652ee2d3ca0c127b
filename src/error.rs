//! Error types for the Payroll Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! [`PayrollError`] covers failures that concern the whole batch (source,
//! configuration, report output) and invalid calculation input, while
//! [`RowError`] describes a single malformed input row that the pipeline
//! skips before moving on.

use thiserror::Error;

/// The main error type for the Payroll Engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::PayrollError;
///
/// let error = PayrollError::SourceNotFound {
///     path: "employee_data.csv".to_string(),
/// };
/// assert_eq!(error.to_string(), "Record source not found: employee_data.csv");
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// The record source does not exist.
    #[error("Record source not found: {path}")]
    SourceNotFound {
        /// The path that was not found.
        path: String,
    },

    /// The record source exists but could not be read.
    #[error("Failed to read record source '{path}': {message}")]
    SourceRead {
        /// The path of the source.
        path: String,
        /// A description of the read failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The deduction schedule is structurally inconsistent.
    #[error("Invalid deduction schedule: {message}")]
    InvalidSchedule {
        /// A description of the inconsistency.
        message: String,
    },

    /// A calculation input was outside its valid domain.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The offending field.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A breakdown could not be written to the report sink.
    #[error("Failed to write report: {message}")]
    ReportWrite {
        /// A description of the write failure.
        message: String,
    },
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;

/// Why a single row could not be turned into an employee record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowErrorKind {
    /// The row has fewer cells than required.
    #[error("missing cell '{column}'")]
    MissingCell {
        /// The column name.
        column: &'static str,
    },

    /// A numeric cell did not contain a number.
    #[error("cell '{column}' is not numeric: '{value}'")]
    InvalidNumber {
        /// The column name.
        column: &'static str,
        /// The raw cell content.
        value: String,
    },

    /// The birthdate cell did not match `MM-DD-YYYY`.
    #[error("birthdate '{value}' is not a valid MM-DD-YYYY date")]
    InvalidDate {
        /// The raw cell content.
        value: String,
    },

    /// The name cell was blank.
    #[error("employee name is empty")]
    EmptyName,

    /// The cell parsed but its value is outside the valid domain.
    #[error("invalid '{field}': {message}")]
    InvalidInput {
        /// The offending field.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },
}

/// A recoverable failure tied to one input row.
///
/// Positions count data rows from 1; the header is row 0.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {position}: {kind}")]
pub struct RowError {
    /// Position of the row in the source.
    pub position: usize,
    /// What went wrong.
    pub kind: RowErrorKind,
}

impl RowError {
    /// Creates a row error at the given position.
    pub fn new(position: usize, kind: RowErrorKind) -> Self {
        Self { position, kind }
    }
}

impl From<(usize, PayrollError)> for RowError {
    fn from((position, error): (usize, PayrollError)) -> Self {
        let kind = match error {
            PayrollError::InvalidInput { field, message } => {
                RowErrorKind::InvalidInput { field, message }
            }
            other => RowErrorKind::InvalidInput {
                field: "record".to_string(),
                message: other.to_string(),
            },
        };
        Self { position, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_not_found_displays_path() {
        let error = PayrollError::SourceNotFound {
            path: "/missing/data.csv".to_string(),
        };
        assert_eq!(error.to_string(), "Record source not found: /missing/data.csv");
    }

    #[test]
    fn test_source_read_displays_path_and_message() {
        let error = PayrollError::SourceRead {
            path: "data.csv".to_string(),
            message: "permission denied".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to read record source 'data.csv': permission denied"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = PayrollError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = PayrollError::InvalidInput {
            field: "gross_salary".to_string(),
            message: "must not be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid input 'gross_salary': must not be negative"
        );
    }

    #[test]
    fn test_row_error_displays_position_and_reason() {
        let error = RowError::new(
            3,
            RowErrorKind::InvalidNumber {
                column: "gross_salary",
                value: "abc".to_string(),
            },
        );
        assert_eq!(
            error.to_string(),
            "row 3: cell 'gross_salary' is not numeric: 'abc'"
        );
    }

    #[test]
    fn test_row_error_from_invalid_input_keeps_field() {
        let error = RowError::from((
            2,
            PayrollError::InvalidInput {
                field: "gross_salary".to_string(),
                message: "must not be negative".to_string(),
            },
        ));
        assert_eq!(error.position, 2);
        assert_eq!(
            error.kind,
            RowErrorKind::InvalidInput {
                field: "gross_salary".to_string(),
                message: "must not be negative".to_string(),
            }
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PayrollError>();
        assert_error::<RowError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> PayrollResult<()> {
            Err(PayrollError::SourceNotFound {
                path: "/test".to_string(),
            })
        }

        fn propagates_error() -> PayrollResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
