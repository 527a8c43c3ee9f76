//! `AnalyticsObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use tracing::warn;

use lift_core::{Period, PeriodStamp, SimConfig, Tick};
use lift_sim::{Building, SimObserver};

use crate::row::{ElevatorPeriodRow, PeriodSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that averages every completed period and writes the
/// result to any [`OutputWriter`] backend (CSV, SQLite, …).
///
/// Summaries are also kept in memory for the caller to print or compare.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct AnalyticsObserver<W: OutputWriter> {
    writer:           W,
    seconds_per_step: f64,
    history:          Vec<PeriodSummaryRow>,
    last_error:       Option<OutputError>,
}

impl<W: OutputWriter> AnalyticsObserver<W> {
    /// Create an observer backed by `writer`, using `config` for the
    /// step-to-seconds conversion.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            seconds_per_step: config.seconds_per_step,
            history:          Vec::new(),
            last_error:       None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Every summary produced so far, in the order the periods ended.
    pub fn history(&self) -> &[PeriodSummaryRow] {
        &self.history
    }

    /// Summaries of one period kind.
    pub fn summaries(&self, period: Period) -> impl Iterator<Item = &PeriodSummaryRow> + '_ {
        self.history.iter().filter(move |r| r.period == period)
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for AnalyticsObserver<W> {
    fn on_period_end(&mut self, stamp: &PeriodStamp, building: &Building) {
        let summary = PeriodSummaryRow::summarize(stamp, building, self.seconds_per_step);
        let result = self.writer.write_period_summary(&summary);
        self.store_err(result);

        let rows = ElevatorPeriodRow::collect(stamp, building);
        let result = self.writer.write_elevator_periods(&rows);
        self.store_err(result);

        self.history.push(summary);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
