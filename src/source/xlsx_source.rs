//! Spreadsheet record source.
//!
//! Reads the first sheet of a workbook. The first row of the used range is a
//! header and is skipped; every other row is converted into text cells so it
//! goes through the same [`parse_record`](super::parse_record) as CSV input.
//! Numeric cells become plain decimals and date-formatted cells become
//! `MM-DD-YYYY` text. Entirely blank rows are dropped but still counted, so
//! positions match the sheet.

use std::path::{Path, PathBuf};

use calamine::{Data, DataType, Reader, open_workbook_auto};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::error::{PayrollError, PayrollResult};

use super::{BIRTHDATE_FORMAT, RawRow, RecordSource};

/// A record source backed by an `.xlsx` (or other calamine-readable) workbook.
///
/// The workbook is opened inside [`RecordSource::read_rows`] and dropped
/// before it returns.
#[derive(Debug, Clone)]
pub struct XlsxSource {
    path: PathBuf,
}

impl XlsxSource {
    /// Creates a source for the given workbook path. Nothing is opened yet.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the path this source reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Renders one cell as the text [`parse_record`](super::parse_record) expects.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => Decimal::from_f64(*f)
            .map(|d| d.normalize().to_string())
            .unwrap_or_else(|| f.to_string()),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_date()
            .map(|d| d.format(BIRTHDATE_FORMAT).to_string())
            .unwrap_or_else(|| cell.to_string()),
        other => other.to_string(),
    }
}

impl RecordSource for XlsxSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read_rows(&mut self) -> PayrollResult<Vec<RawRow>> {
        let path = self.describe();
        if !self.path.exists() {
            return Err(PayrollError::SourceNotFound { path });
        }

        let read_error = |message: String| PayrollError::SourceRead {
            path: path.clone(),
            message,
        };

        let mut workbook = open_workbook_auto(&self.path).map_err(|e| read_error(e.to_string()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| read_error("workbook has no sheets".to_string()))?
            .map_err(|e| read_error(e.to_string()))?;

        let rows = range
            .rows()
            .enumerate()
            .skip(1)
            .filter_map(|(position, cells)| {
                let mut cells: Vec<String> = cells.iter().map(cell_text).collect();
                while cells.last().is_some_and(|c| c.trim().is_empty()) {
                    cells.pop();
                }
                (!cells.is_empty()).then(|| RawRow::new(position, cells))
            })
            .collect();

        Ok(rows)
    }
}
