//! Configuration loading and management for the Payroll Engine.
//!
//! This module provides the deduction schedule (fixed contributions and
//! the withholding tax table) as data, the YAML loader for it, and the
//! per-run [`PayrollConfig`].
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ScheduleLoader;
//!
//! let schedule = ScheduleLoader::load("./config/schedule.yaml").unwrap();
//! println!("Contributions total: {}", schedule.contributions_total());
//! ```

mod loader;
mod types;

pub use loader::ScheduleLoader;
pub use types::{Contribution, DEFAULT_SOURCE_PATH, DeductionSchedule, PayrollConfig, TaxBracket};
