//! Elevator cars: state machine tag, stop lists, and riders.
//!
//! # State machine
//!
//! ```text
//!            dispatch                 arrive at stop
//!   Idle ─────────────▶ Active(d) ─────────────────▶ Loading{n, d}
//!    ▲                    ▲  ▲                           │ n ticks
//!    │ at return floor    │  └──── stops remain ─────────┤
//!    │                    │ dispatch                     │ no stops left
//!    └──── Returning(d) ◀─┴──────────────────────────────┘ (policy)
//! ```
//!
//! The transitions themselves are driven by the tick engine in `lift-sim`;
//! this module only holds the data and the small queries the engine and the
//! dispatcher share.

use std::collections::BTreeSet;

use lift_core::{Direction, ElevatorId, FloorId, Period, PersonId};

use crate::{ByPeriod, ElevatorCounters};

// ── ElevatorState ─────────────────────────────────────────────────────────────

/// The single state a car is in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElevatorState {
    /// Parked with nothing to do.
    Idle,
    /// Travelling one floor per tick in the given direction.
    Active(Direction),
    /// Doors open.  `remaining` ticks are left before the car may move;
    /// `heading` is the direction it was travelling when it stopped.
    Loading { remaining: u32, heading: Direction },
    /// Heading back to its return floor with no stops owed.
    Returning(Direction),
}

/// Fieldless view of [`ElevatorState`], used for counters and ordering.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateKind {
    Returning,
    Active,
    Loading,
    Idle,
}

impl StateKind {
    /// Engine advancement order: returning cars first, idle cars last.
    pub const ADVANCE_ORDER: [StateKind; 4] =
        [StateKind::Returning, StateKind::Active, StateKind::Loading, StateKind::Idle];

    pub fn name(self) -> &'static str {
        match self {
            StateKind::Returning => "returning",
            StateKind::Active => "active",
            StateKind::Loading => "loading",
            StateKind::Idle => "idle",
        }
    }
}

impl ElevatorState {
    #[inline]
    pub fn kind(&self) -> StateKind {
        match self {
            ElevatorState::Idle => StateKind::Idle,
            ElevatorState::Active(_) => StateKind::Active,
            ElevatorState::Loading { .. } => StateKind::Loading,
            ElevatorState::Returning(_) => StateKind::Returning,
        }
    }
}

// ── StopList ──────────────────────────────────────────────────────────────────

/// Floors a car still owes a stop in one direction.  Order is irrelevant;
/// a floor appears at most once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StopList(BTreeSet<FloorId>);

impl StopList {
    /// Returns `true` if the floor was not already listed.
    #[inline]
    pub fn insert(&mut self, floor: FloorId) -> bool {
        self.0.insert(floor)
    }

    #[inline]
    pub fn remove(&mut self, floor: FloorId) -> bool {
        self.0.remove(&floor)
    }

    #[inline]
    pub fn contains(&self, floor: FloorId) -> bool {
        self.0.contains(&floor)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = FloorId> + '_ {
        self.0.iter().copied()
    }
}

// ── DeidleMarker ──────────────────────────────────────────────────────────────

/// Records which call woke a parked (or returning) car.
///
/// The car travels toward `floor` possibly in the opposite direction to the
/// call.  When it stops there it must board the `direction` queue, not the
/// queue matching its travel direction.  While the marker is set the car
/// takes no approaching-car work.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeidleMarker {
    pub floor:     FloorId,
    pub direction: Direction,
}

// ── Elevator ──────────────────────────────────────────────────────────────────

/// One car of the fleet.
#[derive(Clone, Debug, PartialEq)]
pub struct Elevator {
    pub id:            ElevatorId,
    /// Reported, not enforced.
    pub capacity:      u32,
    /// Ticks spent loading at each stop (always >= 1).
    pub load_duration: u32,
    pub floor:         FloorId,
    /// Home position under the return-to policy.
    pub return_to:     Option<FloorId>,
    pub state:         ElevatorState,
    pub up_stops:      StopList,
    pub down_stops:    StopList,
    pub deidle:        Option<DeidleMarker>,
    pub counters:      ByPeriod<ElevatorCounters>,
    /// Riders by destination floor, one slot per floor.
    riders:            Vec<Vec<PersonId>>,
}

impl Elevator {
    pub fn new(
        id:            ElevatorId,
        floor_count:   usize,
        start:         FloorId,
        capacity:      u32,
        load_duration: u32,
        return_to:     Option<FloorId>,
    ) -> Self {
        Self {
            id,
            capacity,
            load_duration,
            floor: start,
            return_to,
            state: ElevatorState::Idle,
            up_stops: StopList::default(),
            down_stops: StopList::default(),
            deidle: None,
            counters: ByPeriod::default(),
            riders: vec![Vec::new(); floor_count],
        }
    }

    // ── Stops ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn stops(&self, direction: Direction) -> &StopList {
        match direction {
            Direction::Up => &self.up_stops,
            Direction::Down => &self.down_stops,
        }
    }

    #[inline]
    pub fn stops_mut(&mut self, direction: Direction) -> &mut StopList {
        match direction {
            Direction::Up => &mut self.up_stops,
            Direction::Down => &mut self.down_stops,
        }
    }

    pub fn has_stops(&self) -> bool {
        !self.up_stops.is_empty() || !self.down_stops.is_empty()
    }

    /// `true` if `floor` is in either stop list.
    pub fn owes_stop(&self, floor: FloorId) -> bool {
        self.up_stops.contains(floor) || self.down_stops.contains(floor)
    }

    /// Closest owed stop across both lists.  Ties go to the up list, then
    /// to the lower floor.
    pub fn nearest_stop(&self) -> Option<FloorId> {
        self.up_stops
            .iter()
            .chain(self.down_stops.iter())
            .min_by_key(|f| f.distance(self.floor))
    }

    /// `true` if `stop` in the `direction` list is pinned by the deidle
    /// marker to the other direction's queue.
    pub fn stop_pinned_elsewhere(&self, stop: FloorId, direction: Direction) -> bool {
        self.deidle
            .is_some_and(|m| m.floor == stop && m.direction != direction)
    }

    // ── Riders ────────────────────────────────────────────────────────────

    #[inline]
    pub fn riders_for(&self, floor: FloorId) -> &[PersonId] {
        self.riders.get(floor.index()).map_or(&[], Vec::as_slice)
    }

    /// Put `person` in the slot for `destination`.  Returns `false` when the
    /// destination is not a floor of this building.
    pub fn board(&mut self, person: PersonId, destination: FloorId) -> bool {
        match self.riders.get_mut(destination.index()) {
            Some(slot) => {
                slot.push(person);
                true
            }
            None => false,
        }
    }

    /// Empty the slot for `floor`.
    pub fn take_riders(&mut self, floor: FloorId) -> Vec<PersonId> {
        self.riders
            .get_mut(floor.index())
            .map(std::mem::take)
            .unwrap_or_default()
    }

    /// Non-empty rider slots as `(destination, riders)`.
    pub fn rider_slots(&self) -> impl Iterator<Item = (FloorId, &[PersonId])> + '_ {
        self.riders
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.is_empty())
            .map(|(i, slot)| (FloorId(i as u32), slot.as_slice()))
    }

    pub fn rider_count(&self) -> usize {
        self.riders.iter().map(Vec::len).sum()
    }

    /// Riders beyond nominal capacity.  Capacity is only reported.
    pub fn overload(&self) -> usize {
        self.rider_count().saturating_sub(self.capacity as usize)
    }

    // ── Counters ──────────────────────────────────────────────────────────

    /// Count one step in the current state, for every period.
    pub fn record_step(&mut self) {
        let kind = self.state.kind();
        self.counters.each_mut(|c| c.record(kind));
    }

    pub fn reset_counters(&mut self, period: Period) {
        self.counters.reset(period);
    }
}
