//! The building: floors, fleet, residents, and pending hall calls.
//!
//! Every resident lives in exactly one place at a time: a floor's
//! `at_rest` list, one of a floor's waiting queues, or one car's rider
//! slot.  `Building` is the only code that moves residents between those
//! collections, and it keeps each `Person::location` tag in step.

use std::collections::VecDeque;

use tracing::{debug, trace};

use lift_core::{Direction, FloorId, Period, PersonId};
use lift_dispatch::{assign_stop, DispatchPolicy};
use lift_model::{Elevator, ElevatorState, Floor, Location, Person};

use crate::ViolationKind;

/// Floors, elevators and residents of one simulation run.
///
/// Owned outright by a [`Simulation`][crate::Simulation]; nothing in it is
/// shared with another run.
#[derive(Clone, Debug)]
pub struct Building {
    pub floors:       Vec<Floor>,
    pub elevators:    Vec<Elevator>,
    pub persons:      Vec<Person>,
    pub policy:       DispatchPolicy,
    /// Up calls not yet bound to a car, oldest first.  A floor appears at
    /// most once.
    pub pending_up:   VecDeque<FloorId>,
    pub pending_down: VecDeque<FloorId>,
}

impl Building {
    pub fn new(
        floors:    Vec<Floor>,
        elevators: Vec<Elevator>,
        persons:   Vec<Person>,
        policy:    DispatchPolicy,
    ) -> Self {
        Self {
            floors,
            elevators,
            persons,
            policy,
            pending_up: VecDeque::new(),
            pending_down: VecDeque::new(),
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    #[inline]
    pub fn population(&self) -> usize {
        self.persons.len()
    }

    #[inline]
    pub fn pending(&self, direction: Direction) -> &VecDeque<FloorId> {
        match direction {
            Direction::Up => &self.pending_up,
            Direction::Down => &self.pending_down,
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending_up.len() + self.pending_down.len()
    }

    pub fn waiting_count(&self) -> usize {
        self.floors.iter().map(Floor::waiting_count).sum()
    }

    pub fn riding_count(&self) -> usize {
        self.elevators.iter().map(Elevator::rider_count).sum()
    }

    // ── Residents ─────────────────────────────────────────────────────────

    /// Light the hall button at (`floor`, `direction`) and queue the call if
    /// the button was dark.
    pub fn call(&mut self, floor: FloorId, direction: Direction) {
        let Some(f) = self.floors.get_mut(floor.index()) else {
            return;
        };
        if f.press(direction) {
            match direction {
                Direction::Up => self.pending_up.push_back(floor),
                Direction::Down => self.pending_down.push_back(floor),
            }
            trace!(floor = floor.0, %direction, "hall call");
        }
    }

    /// Send an at-rest resident to wait for a car to `destination`.
    ///
    /// Returns `false`, and leaves the resident where it is, when
    /// `destination` is the floor it is already on or it is not at rest.
    pub fn send_waiting(&mut self, person: PersonId, destination: FloorId) -> bool {
        let Some(p) = self.persons.get_mut(person.index()) else {
            return false;
        };
        let Location::AtRest(floor) = p.location else {
            return false;
        };
        if floor == destination || !destination.within(self.floors.len()) {
            return false;
        }
        let direction = Direction::toward(floor, destination);
        let f = &mut self.floors[floor.index()];
        if !f.leave_rest(person) {
            return false;
        }
        f.waiting_mut(direction).push(person);
        p.destination = destination;
        p.location = Location::Waiting { floor, direction };
        self.call(floor, direction);
        true
    }

    // ── Dispatch ──────────────────────────────────────────────────────────

    /// Offer every pending call to the fleet, up queue first.  Calls no car
    /// can take stay queued in their original order.  Returns the number
    /// bound.
    pub fn dispatch_pending(&mut self) -> usize {
        let policy = self.policy;
        let fleet = &mut self.elevators;
        let mut bound = 0;
        for (direction, queue) in [
            (Direction::Up, &mut self.pending_up),
            (Direction::Down, &mut self.pending_down),
        ] {
            queue.retain(|&floor| {
                let ok = assign_stop(fleet, policy, floor, direction);
                bound += ok as usize;
                !ok
            });
        }
        bound
    }

    // ── Advancement ───────────────────────────────────────────────────────

    /// Fleet indices in advancement order: returning, active, loading,
    /// idle, fleet order within each group.
    pub fn advance_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.elevators.len()).collect();
        order.sort_by_key(|&i| self.elevators[i].state.kind());
        order
    }

    /// Advance car `idx` by one tick.  Residents who got off are appended to
    /// `alighted`.
    pub fn advance_car(
        &mut self,
        idx:      usize,
        alighted: &mut Vec<PersonId>,
    ) -> Result<(), ViolationKind> {
        let floor_count = self.floors.len();
        let policy = self.policy;
        let car = &mut self.elevators[idx];

        match car.state {
            ElevatorState::Idle => {
                if let Some(stop) = car.nearest_stop() {
                    car.state = ElevatorState::Active(Direction::toward(car.floor, stop));
                    debug!(car = car.id.0, floor = car.floor.0, "idle car holding stops activated");
                }
            }

            ElevatorState::Active(direction) => {
                if car.stops(direction).contains(car.floor) {
                    self.stop_at_floor(idx, direction, alighted)?;
                } else {
                    move_car(car, direction, floor_count)?;
                }
            }

            ElevatorState::Loading { remaining, heading } => {
                let remaining = remaining.saturating_sub(1);
                if remaining > 0 {
                    car.state = ElevatorState::Loading { remaining, heading };
                } else if !car.has_stops() {
                    car.state = policy.park(car);
                    debug!(car = car.id.0, floor = car.floor.0, state = ?car.state, "car parked");
                } else if car.stops(heading).is_empty() {
                    car.state = ElevatorState::Active(heading.opposite());
                } else {
                    car.state = ElevatorState::Active(heading);
                    move_car(car, heading, floor_count)?;
                }
            }

            ElevatorState::Returning(_) => {
                if let Some(stop) = car.nearest_stop() {
                    car.state = ElevatorState::Active(Direction::toward(car.floor, stop));
                    debug!(car = car.id.0, floor = car.floor.0, stop = stop.0, "returning car reclaimed");
                    return Ok(());
                }
                let Some(home) = policy.return_floor(car.return_to) else {
                    car.state = ElevatorState::Idle;
                    return Ok(());
                };
                if car.floor != home {
                    move_car(car, Direction::toward(car.floor, home), floor_count)?;
                }
                if car.floor == home {
                    car.state = ElevatorState::Idle;
                    debug!(car = car.id.0, floor = home.0, "car home");
                }
            }
        }
        Ok(())
    }

    /// An active car has reached a floor it owes a stop in `direction`:
    /// start loading, board one waiting queue, let riders off.  Also clears
    /// a pending call for the boarded queue that no car had taken yet.
    fn stop_at_floor(
        &mut self,
        idx:       usize,
        direction: Direction,
        alighted:  &mut Vec<PersonId>,
    ) -> Result<(), ViolationKind> {
        let car = &mut self.elevators[idx];
        let here = car.floor;
        car.stops_mut(direction).remove(here);
        car.state = ElevatorState::Loading { remaining: car.load_duration, heading: direction };

        // A car woken for a call boards that call's queue, whichever way it
        // arrived.
        let board = match car.deidle {
            Some(marker) if marker.floor == here => {
                car.deidle = None;
                marker.direction
            }
            _ => direction,
        };

        let floor = &mut self.floors[here.index()];
        let boarding = floor.take_waiting(board);
        for &id in &boarding {
            let person = &mut self.persons[id.index()];
            if !car.board(id, person.destination) {
                return Err(ViolationKind::RiderUnroutable {
                    car:         car.id,
                    person:      id,
                    destination: person.destination,
                });
            }
            car.stops_mut(board).insert(person.destination);
            person.location = Location::Riding(car.id);
        }
        floor.reset_call(board);
        match board {
            Direction::Up => self.pending_up.retain(|&f| f != here),
            Direction::Down => self.pending_down.retain(|&f| f != here),
        }

        let leaving = car.take_riders(here);
        for &id in &leaving {
            let person = &mut self.persons[id.index()];
            person.floor = here;
            person.location = Location::AtRest(here);
        }
        floor.at_rest.extend_from_slice(&leaving);
        alighted.extend_from_slice(&leaving);

        debug!(
            car = car.id.0,
            floor = here.0,
            %board,
            boarded = boarding.len(),
            alighted = leaving.len(),
            "car stopped"
        );
        if car.overload() > 0 {
            trace!(car = car.id.0, riders = car.rider_count(), capacity = car.capacity, "car over capacity");
        }
        Ok(())
    }

    // ── Counters ──────────────────────────────────────────────────────────

    /// Count one step for every car and every waiting or riding resident.
    pub fn record_step(&mut self) {
        self.elevators.iter_mut().for_each(Elevator::record_step);
        self.persons.iter_mut().for_each(Person::record_step);
    }

    /// Zero every counter kept for `period`.
    pub fn reset_counters(&mut self, period: Period) {
        for car in &mut self.elevators {
            car.reset_counters(period);
        }
        for person in &mut self.persons {
            person.reset_counters(period);
        }
    }
}

/// Move `car` one floor in `direction`.
fn move_car(car: &mut Elevator, direction: Direction, floor_count: usize) -> Result<(), ViolationKind> {
    match direction.step(car.floor, floor_count) {
        Some(next) => {
            car.floor = next;
            Ok(())
        }
        None => Err(ViolationKind::CarLeftShaft { car: car.id, from: car.floor, direction }),
    }
}
