//! Unit tests for lift-dispatch.

use lift_core::{Direction, ElevatorId, FloorId};
use lift_model::{DeidleMarker, Elevator, ElevatorState};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Idle cars in a 10-floor building, one per start floor.
fn fleet(starts: &[u32]) -> Vec<Elevator> {
    starts
        .iter()
        .enumerate()
        .map(|(i, &f)| Elevator::new(ElevatorId(i as u32), 10, FloorId(f), 10, 5, None))
        .collect()
}

fn moving(car: &mut Elevator, direction: Direction) {
    car.state = ElevatorState::Active(direction);
}

// ── Policy ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod policy {
    use crate::{DispatchError, DispatchPolicy};

    use super::*;

    #[test]
    fn parses_names() {
        assert_eq!("stay_where_stopped".parse::<DispatchPolicy>().unwrap(), DispatchPolicy::StayWhereStopped);
        assert_eq!("return_to".parse::<DispatchPolicy>().unwrap(), DispatchPolicy::ReturnTo(FloorId(0)));
        assert_eq!("return_to:5".parse::<DispatchPolicy>().unwrap(), DispatchPolicy::ReturnTo(FloorId(5)));
        assert!(matches!(
            "round_robin".parse::<DispatchPolicy>(),
            Err(DispatchError::UnknownPolicy(_))
        ));
        assert_eq!(DispatchPolicy::ReturnTo(FloorId(5)).to_string(), "return_to:5");
    }

    #[test]
    fn park_stays_or_heads_home() {
        let mut cars = fleet(&[2]);
        assert_eq!(DispatchPolicy::StayWhereStopped.park(&cars[0]), ElevatorState::Idle);
        assert_eq!(
            DispatchPolicy::ReturnTo(FloorId(5)).park(&cars[0]),
            ElevatorState::Returning(Direction::Up)
        );
        cars[0].return_to = Some(FloorId(2));
        assert_eq!(DispatchPolicy::ReturnTo(FloorId(5)).park(&cars[0]), ElevatorState::Idle);
    }

    #[test]
    fn per_car_return_floor_overrides_default() {
        let p = DispatchPolicy::ReturnTo(FloorId(0));
        assert_eq!(p.return_floor(Some(FloorId(7))), Some(FloorId(7)));
        assert_eq!(p.return_floor(None), Some(FloorId(0)));
        assert_eq!(DispatchPolicy::StayWhereStopped.return_floor(Some(FloorId(7))), None);
    }
}

// ── assign ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod assign {
    use crate::{assign, assign_stop, Assignment, DispatchPolicy};

    use super::*;

    const SWS: DispatchPolicy = DispatchPolicy::StayWhereStopped;
    const RTG: DispatchPolicy = DispatchPolicy::ReturnTo(FloorId(0));

    #[test]
    fn covered_call_is_a_noop_twice() {
        let mut cars = fleet(&[0, 4]);
        moving(&mut cars[1], Direction::Up);
        cars[1].up_stops.insert(FloorId(7));
        let before = cars.clone();

        assert_eq!(assign(&mut cars, SWS, FloorId(7), Direction::Up), Some(Assignment::Covered(ElevatorId(1))));
        assert_eq!(cars, before);
        assert!(assign_stop(&mut cars, SWS, FloorId(7), Direction::Up));
        assert_eq!(cars, before);
    }

    #[test]
    fn other_direction_list_does_not_cover() {
        let mut cars = fleet(&[0]);
        moving(&mut cars[0], Direction::Up);
        cars[0].down_stops.insert(FloorId(7));
        assert_eq!(
            assign(&mut cars, SWS, FloorId(7), Direction::Up),
            Some(Assignment::Approaching(ElevatorId(0)))
        );
        assert!(cars[0].up_stops.contains(FloorId(7)));
    }

    #[test]
    fn parked_car_binds_immediately() {
        let mut cars = fleet(&[3, 6]);
        assert_eq!(assign(&mut cars, SWS, FloorId(6), Direction::Down), Some(Assignment::Parked(ElevatorId(1))));
        assert_eq!(cars[1].state, ElevatorState::Active(Direction::Down));
        assert!(cars[1].down_stops.contains(FloorId(6)));
        assert_eq!(cars[1].deidle, Some(DeidleMarker { floor: FloorId(6), direction: Direction::Down }));
        assert_eq!(cars[0].state, ElevatorState::Idle);
    }

    /// 2 floors, two idle cars on the ground floor, down call from floor 1:
    /// the first car travels up for it.
    #[test]
    fn two_idle_cars_tie_goes_to_first() {
        let mut cars: Vec<Elevator> = (0..2)
            .map(|i| Elevator::new(ElevatorId(i), 2, FloorId(0), 10, 5, None))
            .collect();
        assert_eq!(assign(&mut cars, SWS, FloorId(1), Direction::Down), Some(Assignment::Deidled(ElevatorId(0))));
        assert_eq!(cars[0].state, ElevatorState::Active(Direction::Up));
        assert!(cars[0].up_stops.contains(FloorId(1)));
        assert!(cars[0].down_stops.is_empty());
        assert_eq!(cars[0].deidle, Some(DeidleMarker { floor: FloorId(1), direction: Direction::Down }));
        assert_eq!(cars[1].state, ElevatorState::Idle);
    }

    #[test]
    fn approaching_beats_nearer_idle() {
        let mut cars = fleet(&[1, 6]);
        moving(&mut cars[0], Direction::Up);
        assert_eq!(assign(&mut cars, SWS, FloorId(7), Direction::Up), Some(Assignment::Approaching(ElevatorId(0))));
        assert_eq!(cars[1].state, ElevatorState::Idle);
        assert!(cars[0].deidle.is_none());
    }

    #[test]
    fn nearest_approaching_wins() {
        let mut cars = fleet(&[1, 4, 8]);
        for c in &mut cars {
            moving(c, Direction::Up);
        }
        // Car 2 is above the floor: not approaching.
        assert_eq!(assign(&mut cars, SWS, FloorId(6), Direction::Up), Some(Assignment::Approaching(ElevatorId(1))));
    }

    #[test]
    fn car_on_the_floor_is_not_approaching() {
        let mut cars = fleet(&[6]);
        moving(&mut cars[0], Direction::Up);
        assert_eq!(assign(&mut cars, SWS, FloorId(6), Direction::Up), None);
    }

    #[test]
    fn marked_car_takes_no_approaching_work() {
        let mut cars = fleet(&[2]);
        moving(&mut cars[0], Direction::Up);
        cars[0].deidle = Some(DeidleMarker { floor: FloorId(9), direction: Direction::Down });
        cars[0].up_stops.insert(FloorId(9));
        assert_eq!(assign(&mut cars, SWS, FloorId(5), Direction::Up), None);
    }

    #[test]
    fn pinned_stop_does_not_cover_other_queue() {
        // Woken for a down call at 9, the car owes 9 in its up list but will
        // only board the down queue there.
        let mut cars = fleet(&[2, 0]);
        moving(&mut cars[0], Direction::Up);
        cars[0].deidle = Some(DeidleMarker { floor: FloorId(9), direction: Direction::Down });
        cars[0].up_stops.insert(FloorId(9));
        assert_eq!(assign(&mut cars, SWS, FloorId(9), Direction::Up), Some(Assignment::Deidled(ElevatorId(1))));
    }

    #[test]
    fn no_eligible_car_fails_without_mutation() {
        let mut cars = fleet(&[5, 5]);
        moving(&mut cars[0], Direction::Down);
        cars[1].state = ElevatorState::Loading { remaining: 2, heading: Direction::Up };
        let before = cars.clone();
        assert!(!assign_stop(&mut cars, SWS, FloorId(8), Direction::Up));
        assert_eq!(cars, before);

        // Once car 1 frees up the same call binds, once.
        cars[1].state = ElevatorState::Idle;
        assert!(assign_stop(&mut cars, SWS, FloorId(8), Direction::Up));
        assert_eq!(cars[1].up_stops.len(), 1);
        assert!(assign_stop(&mut cars, SWS, FloorId(8), Direction::Up));
        assert_eq!(cars[1].up_stops.len(), 1);
    }

    #[test]
    fn returning_ignored_under_stay_where_stopped() {
        let mut cars = fleet(&[4]);
        cars[0].state = ElevatorState::Returning(Direction::Down);
        assert_eq!(assign(&mut cars, SWS, FloorId(5), Direction::Up), None);
    }

    #[test]
    fn strictly_nearer_returning_car_is_reclaimed() {
        let mut cars = fleet(&[0, 4]);
        cars[1].state = ElevatorState::Returning(Direction::Down);
        assert_eq!(assign(&mut cars, RTG, FloorId(6), Direction::Down), Some(Assignment::Reclaimed(ElevatorId(1))));
        assert_eq!(cars[1].state, ElevatorState::Active(Direction::Up));
        assert!(cars[1].up_stops.contains(FloorId(6)));
        assert_eq!(cars[1].deidle, Some(DeidleMarker { floor: FloorId(6), direction: Direction::Down }));
        assert_eq!(cars[0].state, ElevatorState::Idle);
    }

    #[test]
    fn equally_near_idle_car_beats_returning() {
        let mut cars = fleet(&[4, 8]);
        cars[0].state = ElevatorState::Returning(Direction::Down);
        assert_eq!(assign(&mut cars, RTG, FloorId(6), Direction::Up), Some(Assignment::Deidled(ElevatorId(1))));
        assert_eq!(cars[0].state, ElevatorState::Returning(Direction::Down));
    }

    #[test]
    fn returning_car_on_the_floor_fails_the_call() {
        let mut cars = fleet(&[3, 9]);
        cars[0].state = ElevatorState::Returning(Direction::Down);
        let before = cars.clone();
        assert_eq!(assign(&mut cars, RTG, FloorId(3), Direction::Up), None);
        assert_eq!(cars, before);
    }
}
