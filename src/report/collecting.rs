//! In-memory report sink.

use crate::error::PayrollResult;
use crate::models::PayBreakdown;

use super::ReportSink;

/// Keeps every breakdown it receives, in order.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    breakdowns: Vec<PayBreakdown>,
}

impl CollectingSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collected breakdowns.
    pub fn breakdowns(&self) -> &[PayBreakdown] {
        &self.breakdowns
    }

    /// Consumes the sink, returning the collected breakdowns.
    pub fn into_breakdowns(self) -> Vec<PayBreakdown> {
        self.breakdowns
    }
}

impl ReportSink for CollectingSink {
    fn emit(&mut self, breakdown: &PayBreakdown) -> PayrollResult<()> {
        self.breakdowns.push(breakdown.clone());
        Ok(())
    }
}
