//! Residents.

use std::sync::Arc;

use lift_core::{ActivityId, Direction, ElevatorId, FloorId, Period, PersonId, Weekday};
use lift_schedule::{DestinationTable, WeeklySchedule};

use crate::{ByPeriod, PersonCounters};

/// Where a resident is.  Mirrors collection membership in the building.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Location {
    AtRest(FloorId),
    Waiting { floor: FloorId, direction: Direction },
    Riding(ElevatorId),
}

/// A resident of the building.
///
/// Residents are created once when the building is built and never
/// destroyed.  The schedule and destination table are shared between
/// residents that have identical ones.
#[derive(Clone, Debug)]
pub struct Person {
    pub id:           PersonId,
    pub home:         FloorId,
    /// Floor the resident was last at rest on.
    pub floor:        FloorId,
    pub destination:  FloorId,
    pub activity:     ActivityId,
    pub location:     Location,
    pub schedule:     Arc<WeeklySchedule>,
    pub destinations: Arc<DestinationTable>,
    /// Index of the next event in today's schedule.
    pub cursor:       usize,
    pub counters:     ByPeriod<PersonCounters>,
}

impl Person {
    /// A resident at rest on its home floor, in its schedule's initial
    /// activity.
    pub fn new(
        id:           PersonId,
        home:         FloorId,
        schedule:     Arc<WeeklySchedule>,
        destinations: Arc<DestinationTable>,
    ) -> Self {
        Self {
            id,
            home,
            floor: home,
            destination: home,
            activity: schedule.initial_activity(),
            location: Location::AtRest(home),
            schedule,
            destinations,
            cursor: 0,
            counters: ByPeriod::default(),
        }
    }

    #[inline]
    pub fn is_at_rest(&self) -> bool {
        matches!(self.location, Location::AtRest(_))
    }

    /// Consume every event due at `step` on `weekday` and return the
    /// activity the last one moves to.
    pub fn take_due(&mut self, weekday: Weekday, step: u32) -> Option<ActivityId> {
        let due = self.schedule.due(weekday, self.cursor, step);
        self.cursor += due.len();
        due.last().map(|c| c.to)
    }

    /// `true` if at least one event is due at `step` on `weekday`.
    pub fn has_due(&self, weekday: Weekday, step: u32) -> bool {
        self.schedule
            .next_step(weekday, self.cursor)
            .is_some_and(|s| s <= step)
    }

    /// Step of the next pending event today.
    pub fn next_due_step(&self, weekday: Weekday) -> Option<u32> {
        self.schedule.next_step(weekday, self.cursor)
    }

    /// Admissible floors for `activity`.
    pub fn floors_for(&self, activity: ActivityId) -> &[FloorId] {
        self.destinations.floors(activity)
    }

    /// Count one step waiting or riding, for every period.
    pub fn record_step(&mut self) {
        match self.location {
            Location::AtRest(_) => {}
            Location::Waiting { .. } => self.counters.each_mut(|c| c.waiting += 1),
            Location::Riding(_) => self.counters.each_mut(|c| c.riding += 1),
        }
    }

    pub fn reset_counters(&mut self, period: Period) {
        self.counters.reset(period);
    }
}
