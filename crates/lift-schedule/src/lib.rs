//! `lift-schedule`: resident activities, weekly schedules, and CSV loading.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`activity`]   | `ActivitySpec`, `ActivityCatalog`, `DestinationTable`     |
//! | [`schedule`]   | `StateChange`, `WeeklySchedule`, `expand_hourly_grid`     |
//! | [`due_queue`]  | `DueQueue` (`BTreeMap<Tick, Vec<PersonId>>`)              |
//! | [`loader`]     | `load_schedules_csv`, `load_schedules_reader`             |
//! | [`error`]      | `ScheduleError`, `ScheduleResult<T>`                      |
//!
//! # Day model (summary)
//!
//! ```text
//! day start:  cursor = 0;  queue each resident at its first event's tick
//! due tick:   take every event with step <= step_of_day, advance cursor
//!             activity = last taken event's `to`
//! ```

pub mod activity;
pub mod due_queue;
pub mod error;
pub mod loader;
pub mod schedule;

#[cfg(test)]
mod tests;

pub use activity::{ActivityCatalog, ActivitySpec, DestinationTable};
pub use due_queue::DueQueue;
pub use error::{ScheduleError, ScheduleResult};
pub use loader::{load_schedules_csv, load_schedules_reader};
pub use schedule::{expand_hourly_grid, jitter_width, HourlyGrid, StateChange, WeeklySchedule};
