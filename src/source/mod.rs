//! Record sources for the Payroll Engine.
//!
//! A [`RecordSource`] yields raw positional rows from a CSV file or the
//! first sheet of a workbook; [`parse_record`] turns a
//! row into an [`EmployeeRecord`](crate::models::EmployeeRecord) or a
//! [`RowError`](crate::error::RowError) carrying the row position.

mod csv_source;
mod memory;
mod row;
mod xlsx_source;

pub use csv_source::CsvSource;
pub use memory::MemorySource;
pub use row::{BIRTHDATE_FORMAT, RawRow, parse_record};
pub use xlsx_source::XlsxSource;

use std::path::Path;

use crate::error::PayrollResult;

/// File extensions read as workbooks; anything else is read as CSV.
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Picks a source for `path` by its extension.
///
/// # Examples
///
/// ```
/// use payroll_engine::source::{RecordSource, open_source};
///
/// assert_eq!(open_source("data/Employees.XLSX").describe(), "data/Employees.XLSX");
/// ```
pub fn open_source<P: AsRef<Path>>(path: P) -> Box<dyn RecordSource> {
    let path = path.as_ref();
    let is_workbook = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| WORKBOOK_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));

    if is_workbook {
        Box::new(XlsxSource::new(path))
    } else {
        Box::new(CsvSource::new(path))
    }
}

/// Somewhere employee rows come from.
pub trait RecordSource {
    /// A human-readable name for log messages.
    fn describe(&self) -> String;

    /// Reads every data row, header excluded.
    ///
    /// An error here means the source as a whole is unusable; the batch
    /// produces nothing. Any handle opened is released before returning.
    fn read_rows(&mut self) -> PayrollResult<Vec<RawRow>>;
}
