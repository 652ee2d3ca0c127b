//! CSV record source.
//!
//! Reads a comma-separated export of the employee sheet. The first line is a
//! header and is skipped; remaining lines map positionally onto
//! [`RawRow`] cells.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::error::{PayrollError, PayrollResult};

use super::{RawRow, RecordSource};

/// A record source backed by a CSV file on disk.
///
/// The file is opened inside [`RecordSource::read_rows`] and closed before
/// it returns, whether reading succeeds or fails.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    /// Creates a source for the given path. Nothing is opened yet.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the path this source reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all data rows from any reader producing CSV text.
    ///
    /// Row positions are line based: the header is on line 1, so a record
    /// starting on line N is data row N - 1. Blank lines are skipped but
    /// still counted.
    pub fn read_from<R: Read>(mut reader: R, path: &str) -> PayrollResult<Vec<RawRow>> {
        let read_error = |message: String| PayrollError::SourceRead {
            path: path.to_string(),
            message,
        };

        let mut data = Vec::new();
        reader
            .read_to_end(&mut data)
            .map_err(|e| read_error(e.to_string()))?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(data.as_slice());

        csv_reader
            .byte_records()
            .enumerate()
            .map(|(index, record)| -> PayrollResult<RawRow> {
                let record = record.map_err(|e| read_error(e.to_string()))?;
                let position = record
                    .position()
                    .map(|p| start_line(&data, p).saturating_sub(1))
                    .unwrap_or(index + 1);
                let cells = record
                    .iter()
                    .map(|cell| String::from_utf8_lossy(cell).into_owned());
                Ok(RawRow::new(position, cells))
            })
            .collect()
    }
}

/// Line on which a record's first field begins.
///
/// The reader stamps a record with its position before skipping the blank
/// lines in front of it, so those line breaks are counted here.
fn start_line(data: &[u8], position: &csv::Position) -> usize {
    let offset = usize::try_from(position.byte()).unwrap_or(data.len());
    let skipped = data
        .get(offset..)
        .unwrap_or_default()
        .iter()
        .take_while(|b| matches!(b, b'\r' | b'\n'))
        .filter(|b| **b == b'\n')
        .count();
    position.line() as usize + skipped
}

impl RecordSource for CsvSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read_rows(&mut self) -> PayrollResult<Vec<RawRow>> {
        let path = self.describe();
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => PayrollError::SourceNotFound { path: path.clone() },
            _ => PayrollError::SourceRead {
                path: path.clone(),
                message: e.to_string(),
            },
        })?;

        Self::read_from(file, &path)
    }
}
