//! Payroll batch pipeline.
//!
//! This module ties a record source, the pay calculation and a report sink
//! together, with logging injected per run.

mod logger;
mod orchestrator;

pub use logger::{LogEntry, LogLevel, MemoryLogger, PayrollLogger, TracingLogger};
pub use orchestrator::{PayrollRun, RunSummary};
