//! The `OutputWriter` trait implemented by all backend writers.

use crate::{ElevatorPeriodRow, OutputResult, PeriodSummaryRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors are returned to the caller; [`AnalyticsObserver`][crate::AnalyticsObserver]
/// stores the first one and hands it out through `take_error`.
pub trait OutputWriter {
    /// Write the building-wide summary of one period.
    fn write_period_summary(&mut self, row: &PeriodSummaryRow) -> OutputResult<()>;

    /// Write one row per car for one period.
    fn write_elevator_periods(&mut self, rows: &[ElevatorPeriodRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
