//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `period_summaries.csv`
//! - `elevator_periods.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{ElevatorPeriodRow, OutputResult, PeriodSummaryRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    summaries: Writer<File>,
    elevators: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut summaries = Writer::from_path(dir.join("period_summaries.csv"))?;
        summaries.write_record([
            "period",
            "day",
            "weekday",
            "hour",
            "ticks",
            "idle_steps",
            "active_steps",
            "loading_steps",
            "returning_steps",
            "idle_pct",
            "active_pct",
            "loading_pct",
            "returning_pct",
            "waiting_steps",
            "riding_steps",
            "waiting_secs",
            "riding_secs",
            "travelers",
        ])?;

        let mut elevators = Writer::from_path(dir.join("elevator_periods.csv"))?;
        elevators.write_record(["period", "day", "hour", "elevator", "idle", "active", "loading", "returning"])?;

        Ok(Self { summaries, elevators, finished: false })
    }
}

fn hour_field(hour: Option<u32>) -> String {
    hour.map(|h| h.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_period_summary(&mut self, row: &PeriodSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.period.name().to_owned(),
            row.day.to_string(),
            row.weekday.abbreviation().to_owned(),
            hour_field(row.hour),
            row.ticks.to_string(),
            format!("{:.3}", row.idle_steps),
            format!("{:.3}", row.active_steps),
            format!("{:.3}", row.loading_steps),
            format!("{:.3}", row.returning_steps),
            format!("{:.2}", row.share(row.idle_steps)),
            format!("{:.2}", row.share(row.active_steps)),
            format!("{:.2}", row.share(row.loading_steps)),
            format!("{:.2}", row.share(row.returning_steps)),
            format!("{:.3}", row.waiting_steps),
            format!("{:.3}", row.riding_steps),
            format!("{:.3}", row.waiting_secs),
            format!("{:.3}", row.riding_secs),
            row.travelers.to_string(),
        ])?;
        Ok(())
    }

    fn write_elevator_periods(&mut self, rows: &[ElevatorPeriodRow]) -> OutputResult<()> {
        for row in rows {
            self.elevators.write_record(&[
                row.period.name().to_owned(),
                row.day.to_string(),
                hour_field(row.hour),
                row.elevator.to_string(),
                row.idle.to_string(),
                row.active.to_string(),
                row.loading.to_string(),
                row.returning.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.elevators.flush()?;
        Ok(())
    }
}
