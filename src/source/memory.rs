//! In-memory record source.

use crate::error::{PayrollError, PayrollResult};

use super::{RawRow, RecordSource};

/// A record source holding its rows in memory, or a fatal error to report.
#[derive(Debug, Default)]
pub struct MemorySource {
    rows: Vec<RawRow>,
    failure: Option<PayrollError>,
}

impl MemorySource {
    /// Creates a source that yields the given rows.
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self {
            rows,
            failure: None,
        }
    }

    /// Creates a source whose read fails with `error`.
    pub fn failing(error: PayrollError) -> Self {
        Self {
            rows: Vec::new(),
            failure: Some(error),
        }
    }

    /// Creates a source from rows of cells, numbering positions from 1.
    pub fn from_cells<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            rows.into_iter()
                .enumerate()
                .map(|(index, cells)| RawRow::new(index + 1, cells))
                .collect(),
        )
    }
}

impl RecordSource for MemorySource {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    /// Yields the rows once; a failing source reports its error once.
    fn read_rows(&mut self) -> PayrollResult<Vec<RawRow>> {
        match self.failure.take() {
            Some(error) => Err(error),
            None => Ok(std::mem::take(&mut self.rows)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cells_numbers_rows() {
        let mut source = MemorySource::from_cells(vec![vec!["a"], vec!["b"]]);
        let rows = source.read_rows().unwrap();

        assert_eq!(rows[0].position, 1);
        assert_eq!(rows[1].position, 2);
        assert_eq!(rows[1].cells, vec!["b".to_string()]);
    }

    #[test]
    fn test_failing_source_returns_error() {
        let mut source = MemorySource::failing(PayrollError::SourceNotFound {
            path: "gone.csv".to_string(),
        });
        assert!(matches!(
            source.read_rows(),
            Err(PayrollError::SourceNotFound { .. })
        ));
    }
}
