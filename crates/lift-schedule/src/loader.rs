//! CSV schedule loader.
//!
//! # CSV format
//!
//! One row per state change.  Activities are given by name and resolved
//! through the [`ActivityCatalog`]; `day` is 0 (Sunday) through 6.
//!
//! ```csv
//! person_id,day,step,from_activity,to_activity
//! 0,1,7200,sleep,meal
//! 0,1,9300,meal,class
//! 0,1,12400,class,freetime
//! 1,0,0,freetime,sleep
//! ```
//!
//! A resident starts the run in the `from_activity` of its earliest event.
//! Residents absent from the file receive an idle schedule in the
//! catalog's first activity and never travel.

use std::io::Read;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use lift_core::time::DAYS_PER_WEEK;
use lift_core::ActivityId;

use crate::{ActivityCatalog, ScheduleError, ScheduleResult, StateChange, WeeklySchedule};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ScheduleRecord {
    person_id:     u32,
    day:           u32,
    step:          u32,
    from_activity: String,
    to_activity:   String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load per-resident [`WeeklySchedule`]s from a CSV file.
///
/// Returns a `Vec` of length `person_count`, indexed by `PersonId`.
pub fn load_schedules_csv(
    path:          &Path,
    catalog:       &ActivityCatalog,
    person_count:  usize,
    steps_per_day: u32,
) -> ScheduleResult<Vec<WeeklySchedule>> {
    let file = std::fs::File::open(path)?;
    load_schedules_reader(file, catalog, person_count, steps_per_day)
}

/// Like [`load_schedules_csv`] but accepts any `Read` source.
pub fn load_schedules_reader<R: Read>(
    reader:        R,
    catalog:       &ActivityCatalog,
    person_count:  usize,
    steps_per_day: u32,
) -> ScheduleResult<Vec<WeeklySchedule>> {
    // ── Parse CSV rows ────────────────────────────────────────────────────
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut by_person: FxHashMap<u32, [Vec<StateChange>; DAYS_PER_WEEK]> = FxHashMap::default();

    for result in csv_reader.deserialize::<ScheduleRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        if row.person_id as usize >= person_count {
            return Err(ScheduleError::Parse(format!(
                "person_id {} out of range for {person_count} residents",
                row.person_id
            )));
        }
        if row.day as usize >= DAYS_PER_WEEK {
            return Err(ScheduleError::DayOutOfRange { day: row.day });
        }
        if row.step >= steps_per_day {
            return Err(ScheduleError::StepOutOfRange { step: row.step, steps_per_day });
        }
        let change = StateChange {
            step: row.step,
            from: catalog.resolve(&row.from_activity)?,
            to:   catalog.resolve(&row.to_activity)?,
        };
        by_person.entry(row.person_id).or_default()[row.day as usize].push(change);
    }

    // ── Build one schedule per resident ───────────────────────────────────
    let schedules = (0..person_count as u32)
        .map(|i| match by_person.remove(&i) {
            None => WeeklySchedule::idle(ActivityId(0)),
            Some(days) => {
                let initial = first_event(&days).map_or(ActivityId(0), |c| c.from);
                WeeklySchedule::new(initial, days)
            }
        })
        .collect();

    Ok(schedules)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Earliest event of the week (first non-empty day, lowest step).
fn first_event(days: &[Vec<StateChange>; DAYS_PER_WEEK]) -> Option<&StateChange> {
    days.iter()
        .find(|d| !d.is_empty())
        .and_then(|d| d.iter().min_by_key(|c| c.step))
}
