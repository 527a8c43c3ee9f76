//! Weekly state-change schedules.
//!
//! # Schedule model
//!
//! A resident's week is seven ordered lists of [`StateChange`] events, one
//! per weekday.  Each event fires at a step within that day (`0` is the
//! first tick of the day) and moves the resident from one activity to
//! another.  The week repeats for as many days as the run lasts.
//!
//! Residents walk their day with a cursor (the index of the next event).
//! The cursor resets at the start of every day.  When a resident is busy
//! riding or waiting at the moment an event falls due, the event is not
//! lost: every event with `step <= now` is taken on the next opportunity,
//! and the last one taken decides the new activity.
//!
//! # Hourly grids
//!
//! Schedule generators usually think in whole hours.  [`expand_hourly_grid`]
//! turns a 7×24 activity grid into jittered events:
//!
//! ```text
//! j     = round(steps_per_hour / 3)
//! step  = hour * steps_per_hour + jitter
//! jitter ∈ [0, 2j)  for hour 0   (nobody can be early for midnight)
//! jitter ∈ [-j, j)  otherwise
//! ```
//!
//! Steps are clamped to the day and kept non-decreasing so the event chain
//! `from → to` stays in order after jitter.

use lift_core::time::{DAYS_PER_WEEK, HOURS_PER_DAY};
use lift_core::{ActivityId, RandomSource, Weekday};

/// One activity per hour, per weekday (Sunday first).
pub type HourlyGrid = [[ActivityId; HOURS_PER_DAY as usize]; DAYS_PER_WEEK];

// ── StateChange ───────────────────────────────────────────────────────────────

/// A scheduled activity transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateChange {
    /// Step within the day at which the change falls due.
    pub step: u32,
    pub from: ActivityId,
    pub to:   ActivityId,
}

// ── WeeklySchedule ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeeklySchedule {
    /// Activity the resident is in when the run starts.
    initial: ActivityId,
    /// Events per weekday, sorted ascending by `step`.
    days:    [Vec<StateChange>; DAYS_PER_WEEK],
}

impl WeeklySchedule {
    /// Construct a schedule, stably sorting each day's events by step.
    pub fn new(initial: ActivityId, mut days: [Vec<StateChange>; DAYS_PER_WEEK]) -> Self {
        for day in &mut days {
            day.sort_by_key(|c| c.step);
        }
        Self { initial, days }
    }

    /// A schedule with no events: the resident never moves.
    pub fn idle(initial: ActivityId) -> Self {
        Self { initial, days: Default::default() }
    }

    pub fn initial_activity(&self) -> ActivityId {
        self.initial
    }

    pub fn day(&self, weekday: Weekday) -> &[StateChange] {
        &self.days[weekday.index()]
    }

    /// Total events across the week.
    pub fn event_count(&self) -> usize {
        self.days.iter().map(Vec::len).sum()
    }

    /// Events from `cursor` onward on `weekday` that are due at `step`.
    pub fn due(&self, weekday: Weekday, cursor: usize, step: u32) -> &[StateChange] {
        let rest = self.day(weekday).get(cursor..).unwrap_or(&[]);
        let n = rest.partition_point(|c| c.step <= step);
        &rest[..n]
    }

    /// Step of the event at `cursor` on `weekday`, if one remains.
    pub fn next_step(&self, weekday: Weekday, cursor: usize) -> Option<u32> {
        self.day(weekday).get(cursor).map(|c| c.step)
    }
}

// ── Grid expansion ────────────────────────────────────────────────────────────

/// Jitter half-width for an hour of `steps_per_hour` steps.
#[inline]
pub fn jitter_width(steps_per_hour: u32) -> u32 {
    (steps_per_hour + 1) / 3
}

/// Expand an hourly activity grid into a jittered [`WeeklySchedule`].
///
/// The resident starts in `grid[0][0]`.  An event is emitted at every hour
/// whose activity differs from the one before it, continuing across day
/// boundaries.
pub fn expand_hourly_grid<R: RandomSource>(
    grid:           &HourlyGrid,
    steps_per_hour: u32,
    steps_per_day:  u32,
    rng:            &mut R,
) -> WeeklySchedule {
    let j = jitter_width(steps_per_hour) as i64;
    let last_step = steps_per_day.saturating_sub(1) as i64;
    let initial = grid[0][0];
    let mut current = initial;
    let mut days: [Vec<StateChange>; DAYS_PER_WEEK] = Default::default();

    for (day, hours) in grid.iter().enumerate() {
        let mut floor_step = 0i64;
        for (hour, &next) in hours.iter().enumerate() {
            if next == current {
                continue;
            }
            let base = hour as i64 * steps_per_hour as i64;
            let jitter = if hour == 0 {
                rng.int_between(0, 2 * j)
            } else {
                rng.int_between(-j, j)
            };
            let step = (base + jitter).clamp(floor_step, last_step);
            floor_step = step;
            days[day].push(StateChange { step: step as u32, from: current, to: next });
            current = next;
        }
    }

    WeeklySchedule { initial, days }
}
