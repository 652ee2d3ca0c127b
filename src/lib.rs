//! Payroll Engine
//!
//! This crate computes per-employee net pay from tabular payroll records.
//! Each record's gross salary is reduced by fixed contributions and a
//! progressive withholding tax, and the resulting breakdown is rendered
//! per employee.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod source;
