//! Unit tests for lift-schedule.

use lift_core::{ActivityId, FloorId};

use crate::{ActivityCatalog, ActivitySpec, HourlyGrid};

// ── Helpers ───────────────────────────────────────────────────────────────────

const FREETIME: ActivityId = ActivityId(0);
const CLASS: ActivityId = ActivityId(1);
const SLEEP: ActivityId = ActivityId(2);

/// freetime anywhere on 0..=2, class on the ground floor or at home,
/// sleep only at home.
fn catalog() -> ActivityCatalog {
    ActivityCatalog::from_specs([
        ActivitySpec::new("freetime", vec![FloorId(0), FloorId(1), FloorId(2)], false),
        ActivitySpec::new("class", vec![FloorId(0)], true),
        ActivitySpec::new("sleep", vec![], true),
    ])
    .unwrap()
}

fn flat_grid(activity: ActivityId) -> HourlyGrid {
    [[activity; 24]; 7]
}

// ── ActivityCatalog / DestinationTable ────────────────────────────────────────

#[cfg(test)]
mod activity {
    use crate::{DestinationTable, ScheduleError};

    use super::*;

    #[test]
    fn ids_follow_insertion_order() {
        let c = catalog();
        assert_eq!(c.len(), 3);
        assert_eq!(c.id_of("class"), Some(CLASS));
        assert_eq!(c.name(SLEEP), "sleep");
        assert_eq!(c.highest_floor(), Some(FloorId(2)));
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut c = catalog();
        let err = c.push(ActivitySpec::new("sleep", vec![], true)).unwrap_err();
        assert!(matches!(err, ScheduleError::DuplicateActivity(name) if name == "sleep"));
    }

    #[test]
    fn unknown_name_fails_to_resolve() {
        assert!(matches!(
            catalog().resolve("juggling"),
            Err(ScheduleError::UnknownActivity(_))
        ));
    }

    #[test]
    fn home_floor_added_where_admissible() {
        let table = DestinationTable::for_resident(&catalog(), FloorId(7));
        assert_eq!(table.floors(FREETIME), &[FloorId(0), FloorId(1), FloorId(2)]);
        assert_eq!(table.floors(CLASS), &[FloorId(0), FloorId(7)]);
        assert_eq!(table.floors(SLEEP), &[FloorId(7)]);
    }

    #[test]
    fn home_floor_not_duplicated() {
        let table = DestinationTable::for_resident(&catalog(), FloorId(0));
        assert_eq!(table.floors(CLASS), &[FloorId(0)]);
    }

    #[test]
    fn unknown_activity_has_no_floors() {
        let table = DestinationTable::for_resident(&catalog(), FloorId(0));
        assert!(table.floors(ActivityId(40)).is_empty());
    }
}

// ── WeeklySchedule / grid expansion ───────────────────────────────────────────

#[cfg(test)]
mod schedule {
    use lift_core::{FirstChoice, SimRng, Weekday};

    use crate::{expand_hourly_grid, jitter_width, StateChange, WeeklySchedule};

    use super::*;

    // 10 steps per hour, 245 per day; jitter half-width 3.
    const SPH: u32 = 10;
    const SPD: u32 = 245;

    #[test]
    fn jitter_width_rounds_to_a_third() {
        assert_eq!(jitter_width(1_028), 343);
        assert_eq!(jitter_width(SPH), 3);
    }

    #[test]
    fn flat_grid_has_no_events() {
        let s = expand_hourly_grid(&flat_grid(FREETIME), SPH, SPD, &mut FirstChoice);
        assert_eq!(s.event_count(), 0);
        assert_eq!(s.initial_activity(), FREETIME);
    }

    #[test]
    fn events_at_activity_boundaries() {
        let mut grid = flat_grid(FREETIME);
        grid[1][8] = CLASS;
        grid[1][9] = CLASS;
        let s = expand_hourly_grid(&grid, SPH, SPD, &mut FirstChoice);
        // FirstChoice always takes the lower jitter bound: -3.
        assert_eq!(
            s.day(Weekday::Monday),
            &[
                StateChange { step: 77, from: FREETIME, to: CLASS },
                StateChange { step: 97, from: CLASS, to: FREETIME },
            ]
        );
        assert!(s.day(Weekday::Sunday).is_empty());
    }

    #[test]
    fn midnight_events_are_never_early() {
        let mut grid = flat_grid(FREETIME);
        grid[2][0] = CLASS;
        let s = expand_hourly_grid(&grid, SPH, SPD, &mut FirstChoice);
        let tuesday = s.day(Weekday::Tuesday);
        assert_eq!(tuesday[0], StateChange { step: 0, from: FREETIME, to: CLASS });
        assert_eq!(tuesday[1].step, 7);
    }

    #[test]
    fn current_activity_carries_across_days() {
        let mut grid = flat_grid(FREETIME);
        grid[0][23] = SLEEP;
        grid[1][0] = SLEEP;
        let s = expand_hourly_grid(&grid, SPH, SPD, &mut FirstChoice);
        assert_eq!(s.day(Weekday::Sunday).len(), 1);
        let monday = s.day(Weekday::Monday);
        assert_eq!(monday.len(), 1);
        assert_eq!(monday[0].from, SLEEP);
        assert_eq!(monday[0].to, FREETIME);
    }

    #[test]
    fn jittered_steps_stay_in_window() {
        let mut grid = flat_grid(FREETIME);
        for day in 0..7 {
            for hour in (0..24).step_by(2) {
                grid[day][hour] = CLASS;
            }
        }
        for seed in 0..20 {
            let s = expand_hourly_grid(&grid, SPH, SPD, &mut SimRng::new(seed));
            for weekday in Weekday::ALL {
                let events = s.day(weekday);
                assert!(events.windows(2).all(|w| w[0].step <= w[1].step));
                for e in events {
                    assert!(e.step < SPD);
                }
            }
            let first_monday = s.day(Weekday::Monday)[0];
            assert!(first_monday.step < 6, "hour-0 jitter in [0, 6)");
            let second_monday = s.day(Weekday::Monday)[1];
            assert!((7..13).contains(&second_monday.step), "hour-1 jitter in [-3, 3)");
        }
    }

    #[test]
    fn due_takes_every_passed_event() {
        let mut days: [Vec<StateChange>; 7] = Default::default();
        days[0] = vec![
            StateChange { step: 30, from: CLASS, to: SLEEP },
            StateChange { step: 10, from: FREETIME, to: CLASS },
        ];
        let s = WeeklySchedule::new(FREETIME, days);
        // Sorted on construction.
        assert_eq!(s.next_step(Weekday::Sunday, 0), Some(10));
        assert!(s.due(Weekday::Sunday, 0, 9).is_empty());
        assert_eq!(s.due(Weekday::Sunday, 0, 10).len(), 1);
        assert_eq!(s.due(Weekday::Sunday, 0, 50).len(), 2);
        assert_eq!(s.due(Weekday::Sunday, 1, 50)[0].to, SLEEP);
        assert!(s.due(Weekday::Sunday, 2, 50).is_empty());
        assert_eq!(s.next_step(Weekday::Sunday, 2), None);
    }
}

// ── DueQueue ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod due_queue {
    use lift_core::{FirstChoice, PersonId, Tick, Weekday};

    use crate::{expand_hourly_grid, DueQueue, WeeklySchedule};

    use super::*;

    #[test]
    fn drain_through_takes_earlier_ticks() {
        let mut q = DueQueue::new();
        q.push(Tick(5), PersonId(0));
        q.push(Tick(5), PersonId(1));
        q.push(Tick(7), PersonId(2));
        q.push(Tick(9), PersonId(3));

        assert_eq!(q.len(), 4);
        assert_eq!(q.drain_through(Tick(7)), vec![PersonId(0), PersonId(1), PersonId(2)]);
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_tick(), Some(Tick(9)));
        assert!(q.drain_through(Tick(8)).is_empty());
    }

    #[test]
    fn rebuild_queues_first_event_of_the_day() {
        let mut grid = flat_grid(FREETIME);
        grid[1][3] = CLASS;
        let busy = expand_hourly_grid(&grid, 10, 245, &mut FirstChoice);
        let idle = WeeklySchedule::idle(FREETIME);

        let mut q = DueQueue::new();
        q.push(Tick(1), PersonId(9));
        q.rebuild_for_day([&busy, &idle], Weekday::Monday, Tick(245));

        assert_eq!(q.len(), 1);
        assert_eq!(q.next_tick(), Some(Tick(245 + 27)));
        assert_eq!(q.drain_through(Tick(1_000)), vec![PersonId(0)]);
        assert!(q.is_empty());
    }
}

// ── CSV Loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use lift_core::Weekday;

    use crate::{load_schedules_reader, ScheduleError};

    use super::*;

    const CSV: &[u8] = b"\
person_id,day,step,from_activity,to_activity\n\
0,1,90,class,freetime\n\
0,1,40,freetime,class\n\
0,3,10,freetime,sleep\n\
1,0,0,sleep,freetime\n\
";

    #[test]
    fn loads_and_sorts_per_day() {
        let s = load_schedules_reader(Cursor::new(CSV), &catalog(), 3, 245).unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s[0].event_count(), 3);
        let monday: Vec<u32> = s[0].day(Weekday::Monday).iter().map(|c| c.step).collect();
        assert_eq!(monday, vec![40, 90]);
        assert_eq!(s[0].day(Weekday::Wednesday)[0].to, SLEEP);
    }

    #[test]
    fn initial_activity_from_earliest_event() {
        let s = load_schedules_reader(Cursor::new(CSV), &catalog(), 2, 245).unwrap();
        assert_eq!(s[0].initial_activity(), FREETIME);
        assert_eq!(s[1].initial_activity(), SLEEP);
    }

    #[test]
    fn absent_resident_gets_idle_schedule() {
        let s = load_schedules_reader(Cursor::new(CSV), &catalog(), 4, 245).unwrap();
        assert_eq!(s[2].event_count(), 0);
        assert_eq!(s[3].initial_activity(), FREETIME);
    }

    #[test]
    fn unknown_activity_errors() {
        let bad = b"person_id,day,step,from_activity,to_activity\n0,0,5,sleep,juggling\n";
        let err = load_schedules_reader(Cursor::new(bad.as_slice()), &catalog(), 1, 245).unwrap_err();
        assert!(matches!(err, ScheduleError::UnknownActivity(name) if name == "juggling"));
    }

    #[test]
    fn out_of_range_rows_error() {
        let day = b"person_id,day,step,from_activity,to_activity\n0,7,5,sleep,class\n";
        assert!(matches!(
            load_schedules_reader(Cursor::new(day.as_slice()), &catalog(), 1, 245),
            Err(ScheduleError::DayOutOfRange { day: 7 })
        ));
        let step = b"person_id,day,step,from_activity,to_activity\n0,0,245,sleep,class\n";
        assert!(matches!(
            load_schedules_reader(Cursor::new(step.as_slice()), &catalog(), 1, 245),
            Err(ScheduleError::StepOutOfRange { step: 245, .. })
        ));
        let person = b"person_id,day,step,from_activity,to_activity\n5,0,1,sleep,class\n";
        assert!(load_schedules_reader(Cursor::new(person.as_slice()), &catalog(), 1, 245).is_err());
    }
}
