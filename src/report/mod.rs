//! Report sinks for the Payroll Engine.
//!
//! A [`ReportSink`] receives each computed [`PayBreakdown`] in input order.
//! Monetary values are rounded once, here, via [`round_money`].

mod collecting;
mod json;
mod text;

pub use collecting::CollectingSink;
pub use json::JsonLinesReport;
pub use text::{SEPARATOR, TextReport};

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::PayrollResult;
use crate::models::PayBreakdown;

/// Somewhere computed breakdowns go.
pub trait ReportSink {
    /// Emits one breakdown.
    fn emit(&mut self, breakdown: &PayBreakdown) -> PayrollResult<()>;

    /// Flushes buffered output at the end of a batch.
    fn finish(&mut self) -> PayrollResult<()> {
        Ok(())
    }
}

/// Rounds a monetary amount to two decimal places, half away from zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::report::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("0.125").unwrap()).to_string(), "0.13");
/// assert_eq!(round_money(Decimal::from_str("19400").unwrap()).to_string(), "19400.00");
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
