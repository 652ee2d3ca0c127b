//! Calculation logic for the Payroll Engine.
//!
//! This module contains the withholding tax calculation over a bracket
//! table, the aggregation of fixed contributions and tax into total
//! deductions, and the net pay calculation for an employee record.

mod deductions;
mod net_pay;
mod withholding_tax;

pub use deductions::calculate_deductions;
pub use net_pay::calculate_pay;
pub use withholding_tax::{TaxResult, calculate_withholding_tax};
