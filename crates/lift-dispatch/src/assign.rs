//! Hall-call assignment.
//!
//! # Decision order
//!
//! ```text
//! 1. covered      some car already owes `floor` in `direction`        → ok, no change
//! 2. parked       idle car standing on `floor`                         → Active(direction)
//! 3. approaching  Active(direction), unmarked, strictly before `floor` → add stop
//! 4. idle         nearest idle car                                     → Active(toward floor)
//! 5. returning    (ReturnTo) returning car strictly nearer than 3/4    → Active(toward floor)
//! 6. otherwise    fail; the caller retries next tick
//! ```
//!
//! Every distance tie goes to the first car in fleet order.  Steps 2, 4 and
//! 5 set the car's deidle marker so that when it stops at `floor` it boards
//! the `direction` queue even if it arrived travelling the other way.

use tracing::trace;

use lift_core::{Direction, ElevatorId, FloorId};
use lift_model::{DeidleMarker, Elevator, ElevatorState};

use crate::DispatchPolicy;

/// Which branch of the decision order bound the call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Assignment {
    /// Already in this car's stop list; nothing changed.
    Covered(ElevatorId),
    /// An idle car on the requested floor took it.
    Parked(ElevatorId),
    /// A car already travelling toward the floor took it.
    Approaching(ElevatorId),
    /// An idle car elsewhere was woken for it.
    Deidled(ElevatorId),
    /// A returning car was turned around for it.
    Reclaimed(ElevatorId),
}

impl Assignment {
    pub fn car(self) -> ElevatorId {
        match self {
            Assignment::Covered(c)
            | Assignment::Parked(c)
            | Assignment::Approaching(c)
            | Assignment::Deidled(c)
            | Assignment::Reclaimed(c) => c,
        }
    }

    /// `true` if the fleet was modified.
    pub fn mutated(self) -> bool {
        !matches!(self, Assignment::Covered(_))
    }
}

/// Bind the call at (`floor`, `direction`) to one car.
///
/// Returns `None` when no car is eligible this tick.  Never mutates the
/// fleet on failure.
pub fn assign(
    fleet:     &mut [Elevator],
    policy:    DispatchPolicy,
    floor:     FloorId,
    direction: Direction,
) -> Option<Assignment> {
    // ── 1. Already covered ────────────────────────────────────────────────
    //
    // A stop pinned by a deidle marker to the other queue only boards that
    // queue, so it does not cover this direction.
    if let Some(car) = fleet.iter().find(|c| {
        c.stops(direction).contains(floor) && !c.stop_pinned_elsewhere(floor, direction)
    }) {
        return Some(Assignment::Covered(car.id));
    }

    // ── 2. Idle car parked on the floor ───────────────────────────────────
    if let Some(car) = fleet
        .iter_mut()
        .find(|c| c.state == ElevatorState::Idle && c.floor == floor)
    {
        car.stops_mut(direction).insert(floor);
        car.state = ElevatorState::Active(direction);
        car.deidle = Some(DeidleMarker { floor, direction });
        trace!(car = car.id.0, floor = floor.0, %direction, "parked car takes call");
        return Some(Assignment::Parked(car.id));
    }

    // ── 3 & 4. Approaching, else idle ─────────────────────────────────────
    let approaching = nearest(fleet, floor, |c| {
        c.state == ElevatorState::Active(direction)
            && c.deidle.is_none()
            && direction.approaches(c.floor, floor)
    });
    let idle = nearest(fleet, floor, |c| c.state == ElevatorState::Idle);

    // ── 5. Returning (ReturnTo only) ──────────────────────────────────────
    if policy.reclaims_returning() {
        let returning = nearest(fleet, floor, |c| matches!(c.state, ElevatorState::Returning(_)));
        if let Some((i, dist)) = returning {
            let best_other = [approaching, idle].into_iter().flatten().map(|(_, d)| d).min();
            if best_other.is_none_or(|d| dist < d) {
                // A returning car passing through the floor does not stop
                // for it.  The call waits for the next tick.
                if dist == 0 {
                    return None;
                }
                wake_toward(&mut fleet[i], floor, direction);
                return Some(Assignment::Reclaimed(fleet[i].id));
            }
        }
    }

    if let Some((i, _)) = approaching {
        let car = &mut fleet[i];
        car.stops_mut(direction).insert(floor);
        return Some(Assignment::Approaching(car.id));
    }

    if let Some((i, _)) = idle {
        wake_toward(&mut fleet[i], floor, direction);
        return Some(Assignment::Deidled(fleet[i].id));
    }

    // ── 6. Nothing eligible ───────────────────────────────────────────────
    None
}

/// [`assign`] reduced to success or failure.
#[inline]
pub fn assign_stop(
    fleet:     &mut [Elevator],
    policy:    DispatchPolicy,
    floor:     FloorId,
    direction: Direction,
) -> bool {
    assign(fleet, policy, floor, direction).is_some()
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Index and distance of the nearest car matching `eligible`.  Ties go to
/// the lowest index.
fn nearest(
    fleet:    &[Elevator],
    floor:    FloorId,
    eligible: impl Fn(&Elevator) -> bool,
) -> Option<(usize, u32)> {
    fleet
        .iter()
        .enumerate()
        .filter(|(_, c)| eligible(c))
        .map(|(i, c)| (i, c.floor.distance(floor)))
        .min_by_key(|&(_, d)| d)
}

/// Send a car not on `floor` toward it, pinning the `direction` queue.
fn wake_toward(car: &mut Elevator, floor: FloorId, direction: Direction) {
    let travel = Direction::toward(car.floor, floor);
    car.stops_mut(travel).insert(floor);
    car.state = ElevatorState::Active(travel);
    car.deidle = Some(DeidleMarker { floor, direction });
    trace!(car = car.id.0, floor = floor.0, %direction, %travel, "car woken for call");
}
