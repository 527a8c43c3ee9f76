//! `lift-output`: per-period analytics for the lift simulation.
//!
//! Two backends are provided behind Cargo features:
//!
//! | Feature   | Backend     | Files created                                       |
//! |-----------|-------------|-----------------------------------------------------|
//! | *(none)*  | CSV         | `period_summaries.csv`, `elevator_periods.csv`      |
//! | `sqlite`  | SQLite      | `output.db`                                         |
//!
//! Both backends implement [`OutputWriter`] and are driven by
//! [`AnalyticsObserver`], which implements `lift_sim::SimObserver` and
//! reads the building's counters at every hour and day boundary, before
//! the engine resets them.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lift_output::{AnalyticsObserver, CsvWriter};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = AnalyticsObserver::new(writer, &config);
//! sim.run(&mut obs).unwrap();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::AnalyticsObserver;
pub use row::{ElevatorPeriodRow, PeriodSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
