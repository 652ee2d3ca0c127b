//! Batch orchestration.
//!
//! A [`PayrollRun`] reads every row from a [`RecordSource`], computes a
//! [`PayBreakdown`] for each row that parses, and forwards it to a
//! [`ReportSink`] in source order. Bad rows are logged and skipped; an invalid
//! schedule, an unreadable source or an unwritable sink ends the batch.

use tracing::info_span;
use uuid::Uuid;

use crate::calculation::calculate_pay;
use crate::config::{DeductionSchedule, ScheduleLoader};
use crate::error::RowError;
use crate::models::PayBreakdown;
use crate::report::ReportSink;
use crate::source::{RawRow, RecordSource, parse_record};

use super::logger::PayrollLogger;

/// What happened during one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Identifier of the batch, attached to its log events.
    pub batch_id: Uuid,
    /// Number of data rows read from the source.
    pub rows_read: usize,
    /// Number of breakdowns forwarded to the sink.
    pub emitted: usize,
    /// Positions of rows that were skipped.
    pub skipped: Vec<usize>,
    /// The fatal failure that ended the batch, if any.
    pub fatal: Option<String>,
}

impl RunSummary {
    fn new(batch_id: Uuid) -> Self {
        Self {
            batch_id,
            rows_read: 0,
            emitted: 0,
            skipped: Vec::new(),
            fatal: None,
        }
    }

    /// Returns true unless the batch ended on a fatal failure.
    ///
    /// Skipped rows do not make a batch unsuccessful.
    pub fn is_success(&self) -> bool {
        self.fatal.is_none()
    }
}

/// One payroll batch over a fixed schedule and logger.
pub struct PayrollRun<'a> {
    schedule: &'a DeductionSchedule,
    logger: &'a dyn PayrollLogger,
    batch_id: Uuid,
}

impl<'a> PayrollRun<'a> {
    /// Creates a run with a fresh batch id.
    pub fn new(schedule: &'a DeductionSchedule, logger: &'a dyn PayrollLogger) -> Self {
        Self {
            schedule,
            logger,
            batch_id: Uuid::new_v4(),
        }
    }

    /// Returns this run's batch id.
    pub fn batch_id(&self) -> Uuid {
        self.batch_id
    }

    /// Computes the breakdown for one raw row.
    pub fn process_row(&self, row: &RawRow) -> Result<PayBreakdown, RowError> {
        let record = parse_record(row)?;
        calculate_pay(&record, self.schedule).map_err(|e| RowError::from((row.position, e)))
    }

    /// Runs the batch to completion.
    ///
    /// Never panics on bad input: every outcome is reported through the
    /// logger and the returned [`RunSummary`].
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::config::DeductionSchedule;
    /// use payroll_engine::pipeline::{MemoryLogger, PayrollRun};
    /// use payroll_engine::report::CollectingSink;
    /// use payroll_engine::source::MemorySource;
    ///
    /// let schedule = DeductionSchedule::default();
    /// let logger = MemoryLogger::new();
    /// let mut source = MemorySource::from_cells(vec![
    ///     vec!["1", "Garcia", "10-11-1983", "160", "20000"],
    ///     vec!["2", "Lim", "06-19-1988", "160", "n/a"],
    /// ]);
    /// let mut sink = CollectingSink::new();
    ///
    /// let summary = PayrollRun::new(&schedule, &logger).run(&mut source, &mut sink);
    /// assert_eq!(summary.emitted, 1);
    /// assert_eq!(summary.skipped, vec![2]);
    /// assert_eq!(logger.warnings().len(), 1);
    /// ```
    pub fn run(&self, source: &mut dyn RecordSource, sink: &mut dyn ReportSink) -> RunSummary {
        let _span = info_span!("payroll_batch", batch_id = %self.batch_id).entered();
        let mut summary = RunSummary::new(self.batch_id);
        let source_name = source.describe();

        self.logger
            .info(&format!("Processing payroll batch from {}", source_name));

        // A broken schedule would otherwise fail every row the same way.
        if let Err(err) = ScheduleLoader::validate(self.schedule) {
            self.logger
                .error(&format!("Refusing to run with deduction schedule: {}", err));
            summary.fatal = Some(err.to_string());
            return summary;
        }

        let rows = match source.read_rows() {
            Ok(rows) => rows,
            Err(err) => {
                self.logger.error(&format!(
                    "Unable to read record source {}: {}",
                    source_name, err
                ));
                summary.fatal = Some(err.to_string());
                return summary;
            }
        };
        summary.rows_read = rows.len();

        for row in &rows {
            let breakdown = match self.process_row(row) {
                Ok(breakdown) => breakdown,
                Err(row_error) => {
                    self.logger.warn(&format!(
                        "Skipping row {}: {}",
                        row_error.position, row_error.kind
                    ));
                    summary.skipped.push(row_error.position);
                    continue;
                }
            };

            if let Err(err) = sink.emit(&breakdown) {
                self.logger
                    .error(&format!("Aborting batch at row {}: {}", row.position, err));
                summary.fatal = Some(err.to_string());
                return summary;
            }
            summary.emitted += 1;
        }

        if let Err(err) = sink.finish() {
            self.logger.error(&format!("Unable to finish report: {}", err));
            summary.fatal = Some(err.to_string());
            return summary;
        }

        self.logger.info(&format!(
            "Payroll batch complete: {} rows read, {} processed, {} skipped",
            summary.rows_read,
            summary.emitted,
            summary.skipped.len()
        ));
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PayrollError, PayrollResult};
    use crate::pipeline::MemoryLogger;
    use crate::report::CollectingSink;
    use crate::source::MemorySource;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn row(id: &str, gross: &str) -> Vec<String> {
        vec![
            id.to_string(),
            format!("Employee {}", id),
            "01-15-1990".to_string(),
            "160".to_string(),
            gross.to_string(),
        ]
    }

    fn ids(sink: &CollectingSink) -> Vec<u32> {
        sink.breakdowns().iter().map(|b| b.employee.id).collect()
    }

    #[test]
    fn test_all_rows_processed_in_order() {
        let schedule = DeductionSchedule::default();
        let logger = MemoryLogger::new();
        let mut source =
            MemorySource::from_cells(vec![row("3", "20000"), row("1", "33333"), row("2", "90000")]);
        let mut sink = CollectingSink::new();

        let summary = PayrollRun::new(&schedule, &logger).run(&mut source, &mut sink);

        assert!(summary.is_success());
        assert_eq!(summary.rows_read, 3);
        assert_eq!(summary.emitted, 3);
        assert_eq!(ids(&sink), vec![3, 1, 2]);
        assert_eq!(sink.breakdowns()[1].net_pay, dec("30233"));
        assert!(logger.warnings().is_empty());
    }

    #[test]
    fn test_bad_row_skipped_and_batch_continues() {
        let schedule = DeductionSchedule::default();
        let logger = MemoryLogger::new();
        let mut source = MemorySource::from_cells(vec![
            row("1", "20000"),
            row("2", "25000"),
            row("3", "not-a-number"),
            row("4", "40000"),
            row("5", "50000"),
        ]);
        let mut sink = CollectingSink::new();

        let summary = PayrollRun::new(&schedule, &logger).run(&mut source, &mut sink);

        assert!(summary.is_success());
        assert_eq!(ids(&sink), vec![1, 2, 4, 5]);
        assert_eq!(summary.skipped, vec![3]);

        let warnings = logger.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("row 3"));
        assert!(warnings[0].contains("not-a-number"));
    }

    #[test]
    fn test_negative_salary_row_skipped_not_fatal() {
        let schedule = DeductionSchedule::default();
        let logger = MemoryLogger::new();
        let mut source = MemorySource::from_cells(vec![row("1", "-100"), row("2", "1000")]);
        let mut sink = CollectingSink::new();

        let summary = PayrollRun::new(&schedule, &logger).run(&mut source, &mut sink);

        assert!(summary.is_success());
        assert_eq!(summary.skipped, vec![1]);
        assert_eq!(ids(&sink), vec![2]);
    }

    #[test]
    fn test_source_failure_is_fatal_with_no_output() {
        let schedule = DeductionSchedule::default();
        let logger = MemoryLogger::new();
        let mut source = MemorySource::failing(PayrollError::SourceNotFound {
            path: "employee_data.csv".to_string(),
        });
        let mut sink = CollectingSink::new();

        let summary = PayrollRun::new(&schedule, &logger).run(&mut source, &mut sink);

        assert!(!summary.is_success());
        assert!(sink.breakdowns().is_empty());
        assert_eq!(summary.emitted, 0);
        assert_eq!(logger.errors().len(), 1);
        assert!(logger.errors()[0].contains("employee_data.csv"));
    }

    #[test]
    fn test_empty_source_succeeds_with_nothing_emitted() {
        let schedule = DeductionSchedule::default();
        let logger = MemoryLogger::new();
        let mut source = MemorySource::default();
        let mut sink = CollectingSink::new();

        let summary = PayrollRun::new(&schedule, &logger).run(&mut source, &mut sink);

        assert!(summary.is_success());
        assert_eq!(summary.rows_read, 0);
        assert!(sink.breakdowns().is_empty());
    }

    #[test]
    fn test_duplicate_ids_processed_independently() {
        let schedule = DeductionSchedule::default();
        let logger = MemoryLogger::new();
        let mut source = MemorySource::from_cells(vec![row("7", "20000"), row("7", "33333")]);
        let mut sink = CollectingSink::new();

        PayrollRun::new(&schedule, &logger).run(&mut source, &mut sink);

        assert_eq!(ids(&sink), vec![7, 7]);
    }

    struct RejectingSink {
        accepted: usize,
        limit: usize,
    }

    impl ReportSink for RejectingSink {
        fn emit(&mut self, _breakdown: &PayBreakdown) -> PayrollResult<()> {
            if self.accepted == self.limit {
                return Err(PayrollError::ReportWrite {
                    message: "disk full".to_string(),
                });
            }
            self.accepted += 1;
            Ok(())
        }
    }

    #[test]
    fn test_sink_failure_ends_batch() {
        let schedule = DeductionSchedule::default();
        let logger = MemoryLogger::new();
        let mut source =
            MemorySource::from_cells(vec![row("1", "1000"), row("2", "2000"), row("3", "3000")]);
        let mut sink = RejectingSink {
            accepted: 0,
            limit: 1,
        };

        let summary = PayrollRun::new(&schedule, &logger).run(&mut source, &mut sink);

        assert!(!summary.is_success());
        assert_eq!(summary.emitted, 1);
        assert_eq!(logger.errors().len(), 1);
        assert!(logger.errors()[0].contains("row 2"));
    }

    #[test]
    fn test_invalid_schedule_is_fatal_before_reading_rows() {
        let mut schedule = DeductionSchedule::default();
        if let Some(top) = schedule.brackets.last_mut() {
            top.upper_bound = Some(dec("1000000"));
        }
        let logger = MemoryLogger::new();
        let mut source = MemorySource::from_cells(vec![row("1", "20000"), row("2", "2000000")]);
        let mut sink = CollectingSink::new();

        let summary = PayrollRun::new(&schedule, &logger).run(&mut source, &mut sink);

        assert!(!summary.is_success());
        assert_eq!(summary.rows_read, 0);
        assert_eq!(summary.emitted, 0);
        assert!(summary.skipped.is_empty());
        assert!(sink.breakdowns().is_empty());
        assert!(logger.warnings().is_empty());
        assert_eq!(logger.errors().len(), 1);
        assert!(logger.errors()[0].contains("schedule"));
    }

    #[test]
    fn test_summary_carries_batch_id() {
        let schedule = DeductionSchedule::default();
        let logger = MemoryLogger::new();
        let run = PayrollRun::new(&schedule, &logger);
        let summary = run.run(&mut MemorySource::default(), &mut CollectingSink::new());

        assert_eq!(summary.batch_id, run.batch_id());
    }
}
