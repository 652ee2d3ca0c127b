//! Logging capability injected into a payroll run.
//!
//! The orchestrator never logs through globals; it reports skipped rows and
//! fatal failures through a [`PayrollLogger`] it is handed for one batch.

use std::cell::RefCell;

use tracing::{error, info, warn};

/// Receives the events of one payroll batch.
pub trait PayrollLogger {
    /// Progress information. Ignored unless overridden.
    fn info(&self, _message: &str) {}

    /// A recoverable problem, such as a skipped row.
    fn warn(&self, message: &str);

    /// An unrecoverable failure of the batch.
    fn error(&self, message: &str);
}

/// Forwards events to `tracing`.
///
/// Events inherit the `payroll_batch` span the orchestrator enters, so each
/// line carries the batch id.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl PayrollLogger for TracingLogger {
    fn info(&self, message: &str) {
        info!("{}", message);
    }

    fn warn(&self, message: &str) {
        warn!("{}", message);
    }

    fn error(&self, message: &str) {
        error!("{}", message);
    }
}

/// Severity of a captured log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Progress information.
    Info,
    /// Recoverable problem.
    Warn,
    /// Unrecoverable failure.
    Error,
}

/// A captured log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// The severity.
    pub level: LogLevel,
    /// The message text.
    pub message: String,
}

/// Records every event in memory.
///
/// # Examples
///
/// ```
/// use payroll_engine::pipeline::{MemoryLogger, PayrollLogger};
///
/// let logger = MemoryLogger::new();
/// logger.warn("row 3 skipped");
/// assert_eq!(logger.warnings(), vec!["row 3 skipped".to_string()]);
/// ```
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: RefCell<Vec<LogEntry>>,
}

impl MemoryLogger {
    /// Creates an empty logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all captured entries in order.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().clone()
    }

    /// Returns the messages logged at warn level.
    pub fn warnings(&self) -> Vec<String> {
        self.messages_at(LogLevel::Warn)
    }

    /// Returns the messages logged at error level.
    pub fn errors(&self) -> Vec<String> {
        self.messages_at(LogLevel::Error)
    }

    fn messages_at(&self, level: LogLevel) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.level == level)
            .map(|e| e.message.clone())
            .collect()
    }

    fn push(&self, level: LogLevel, message: &str) {
        self.entries.borrow_mut().push(LogEntry {
            level,
            message: message.to_string(),
        });
    }
}

impl PayrollLogger for MemoryLogger {
    fn info(&self, message: &str) {
        self.push(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.push(LogLevel::Error, message);
    }
}
