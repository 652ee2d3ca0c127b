//! Core data models for the Payroll Engine.
//!
//! This module contains the input record and the computed breakdown types.

mod employee;
mod pay_breakdown;

pub use employee::EmployeeRecord;
pub use pay_breakdown::{AuditStep, ContributionLine, DeductionBreakdown, PayBreakdown};
