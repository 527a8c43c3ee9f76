//! `DueQueue`: sparse per-tick resident activation queue.
//!
//! Most residents are doing nothing most ticks.  Instead of checking every
//! resident's schedule every tick, each resident registers the tick of its
//! next state change; each tick the simulation drains only the residents
//! whose tick has come.
//!
//! `BTreeMap` gives O(log W) insert and pop where W is the number of
//! distinct due ticks currently enqueued.

use std::collections::BTreeMap;

use lift_core::{PersonId, Tick, Weekday};

use crate::WeeklySchedule;

/// Maps simulation ticks to the residents due at that tick.
#[derive(Default, Debug)]
pub struct DueQueue {
    inner: BTreeMap<Tick, Vec<PersonId>>,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl DueQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the queue for the day starting at `day_start`.
    ///
    /// Every resident whose schedule has an event on `weekday` is queued at
    /// the tick of that day's first event.  Existing entries are discarded.
    pub fn rebuild_for_day<'a>(
        &mut self,
        schedules: impl IntoIterator<Item = &'a WeeklySchedule>,
        weekday:   Weekday,
        day_start: Tick,
    ) {
        self.clear();
        for (i, schedule) in schedules.into_iter().enumerate() {
            if let Some(step) = schedule.next_step(weekday, 0) {
                self.push(day_start + step as u64, PersonId(i as u32));
            }
        }
    }

    /// Schedule `person` at `tick`.  A resident may be queued more than
    /// once; consumers must tolerate entries that are no longer due.
    pub fn push(&mut self, tick: Tick, person: PersonId) {
        self.inner.entry(tick).or_default().push(person);
        self.total += 1;
    }

    /// Remove and return everyone queued at or before `tick`, earliest first.
    pub fn drain_through(&mut self, tick: Tick) -> Vec<PersonId> {
        let later = self.inner.split_off(&Tick(tick.0 + 1));
        let due = std::mem::replace(&mut self.inner, later);
        let people: Vec<PersonId> = due.into_values().flatten().collect();
        self.total -= people.len();
        people
    }

    /// The earliest tick with at least one queued resident.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
        self.total = 0;
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
