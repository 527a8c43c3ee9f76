//! Synthetic weekly timetables for residence-hall students.
//!
//! Each student gets a 7×24 hourly grid built in layers, each layer only
//! claiming hours still free:
//!
//! | Layer     | Rule                                                           |
//! |-----------|----------------------------------------------------------------|
//! | class     | 12–18 credit hours as 3/4-credit courses, 08:00–17:00 starts   |
//! | sleep     | early bird (fixed wake 05–09) or night owl (wake before class) |
//! | meal      | breakfast, lunch, dinner relative to wake-up                   |
//! | exercise  | one hour on 1 day in 4                                         |
//! | shop      | one hour on 1 day in 5                                         |
//! | chores    | one hour on 1 day in 2                                         |
//! | study     | each remaining free hour, 1 in 4                               |
//!
//! Sleep is the exception: it may take free hours on the previous evening
//! but never overwrites a class.

use tracing::debug;

use lift_core::{ActivityId, RandomSource};
use lift_schedule::HourlyGrid;

pub const FREETIME: ActivityId = ActivityId(0);
pub const CLASS:    ActivityId = ActivityId(1);
pub const SLEEP:    ActivityId = ActivityId(2);
pub const MEAL:     ActivityId = ActivityId(3);
pub const EXERCISE: ActivityId = ActivityId(4);
pub const SHOP:     ActivityId = ActivityId(5);
pub const CHORES:   ActivityId = ActivityId(6);
pub const STUDY:    ActivityId = ActivityId(7);

/// Catalog names, in `ActivityId` order.
pub const ACTIVITY_NAMES: [&str; 8] =
    ["freetime", "class", "sleep", "meal", "exercise", "shop", "chores", "study"];

const MIN_CREDITS: i64 = 12;
const MAX_CREDITS: i64 = 18;
/// Course start hours, `08..18`.
const CLASS_HOURS: std::ops::Range<usize> = 8..18;
/// Hours at which an errand may be placed.
const ERRAND_HOURS: [usize; 14] = [0, 1, 3, 5, 7, 8, 10, 12, 14, 15, 17, 19, 21, 23];

const MONDAY: usize = 1;
const WEDNESDAY: usize = 3;
const FRIDAY: usize = 5;
const WEEKDAYS: std::ops::RangeInclusive<usize> = MONDAY..=FRIDAY;

/// Generate one student's week.
pub fn student_week<R: RandomSource>(rng: &mut R) -> HourlyGrid {
    let mut grid = [[FREETIME; 24]; 7];
    place_classes(&mut grid, rng);
    place_sleep(&mut grid, rng);
    place_meals(&mut grid, rng);
    for (activity, one_in) in [(EXERCISE, 4), (SHOP, 5), (CHORES, 2)] {
        place_errands(&mut grid, activity, one_in, rng);
    }
    place_study(&mut grid, rng);
    grid
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Put `activity` in one uniformly chosen free `(day, hour)` cell.
fn claim_any<R: RandomSource>(
    grid:     &mut HourlyGrid,
    cells:    impl IntoIterator<Item = (usize, usize)>,
    activity: ActivityId,
    rng:      &mut R,
) -> bool {
    let free: Vec<_> = cells.into_iter().filter(|&(d, h)| grid[d][h] == FREETIME).collect();
    match rng.choose(&free) {
        Some(&(d, h)) => {
            grid[d][h] = activity;
            true
        }
        None => false,
    }
}

/// Put a class at one hour free on every day of `days`.
fn claim_pattern<R: RandomSource>(grid: &mut HourlyGrid, days: &[usize], rng: &mut R) -> bool {
    let hours: Vec<usize> = CLASS_HOURS
        .filter(|&h| days.iter().all(|&d| grid[d][h] == FREETIME))
        .collect();
    match rng.choose(&hours) {
        Some(&h) => {
            days.iter().for_each(|&d| grid[d][h] = CLASS);
            true
        }
        None => false,
    }
}

// ── Classes ───────────────────────────────────────────────────────────────────

fn place_classes<R: RandomSource>(grid: &mut HourlyGrid, rng: &mut R) {
    let mut left = rng.int_between(MIN_CREDITS, MAX_CREDITS + 1);
    let mut discussions = 0;

    while left > 0 {
        let credits = if rng.index_below(2) == 0 { left.min(3) } else { left.min(4) };
        left -= credits;

        let (placed, discussion) = match credits {
            4 => (claim_pattern(grid, &[MONDAY, WEDNESDAY, FRIDAY], rng), true),
            3 => match rng.index_below(3) {
                0 => (claim_pattern(grid, &[MONDAY, WEDNESDAY, FRIDAY], rng), false),
                1 => (claim_pattern(grid, &[MONDAY, WEDNESDAY], rng), true),
                _ => (claim_pattern(grid, &[WEDNESDAY, FRIDAY], rng), true),
            },
            2 => match rng.index_below(2) {
                0 => (claim_pattern(grid, &[MONDAY, WEDNESDAY], rng), false),
                _ => (claim_pattern(grid, &[WEDNESDAY, FRIDAY], rng), false),
            },
            _ => (claim_any(grid, class_cells(), CLASS, rng), false),
        };

        if !placed {
            debug!(credits, "no room for course");
        } else if discussion {
            discussions += 1;
        }
    }

    for _ in 0..discussions {
        if !claim_any(grid, class_cells(), CLASS, rng) {
            debug!("no room for discussion section");
        }
    }
}

fn class_cells() -> impl Iterator<Item = (usize, usize)> {
    WEEKDAYS.flat_map(|d| CLASS_HOURS.map(move |h| (d, h)))
}

fn first_class(day: &[ActivityId; 24]) -> Option<usize> {
    day.iter().position(|&a| a == CLASS)
}

// ── Sleep ─────────────────────────────────────────────────────────────────────

fn place_sleep<R: RandomSource>(grid: &mut HourlyGrid, rng: &mut R) {
    let night_owl = rng.index_below(2) == 0;

    if night_owl {
        for day in 0..7 {
            let (wake, amount) = match first_class(&grid[day]) {
                Some(first) => (first - 1, rng.int_between(5, 10) as usize),
                None => (rng.int_between(10, 15) as usize, rng.int_between(6, 11) as usize),
            };
            sleep_until(grid, day, wake, amount);
        }
    } else {
        let earliest = grid.iter().filter_map(first_class).min().unwrap_or(10);
        let wake = rng.int_between(5, earliest.min(10) as i64) as usize;
        for day in 0..7 {
            let amount = rng.int_between(7, 10) as usize;
            sleep_until(grid, day, wake, amount);
        }
    }
}

/// Sleep `amount` hours ending at `wake` on `day`, spilling into the
/// previous evening when needed.
fn sleep_until(grid: &mut HourlyGrid, day: usize, wake: usize, amount: usize) {
    let mut mark = |d: usize, hours: std::ops::Range<usize>| {
        for h in hours {
            if grid[d][h] != CLASS {
                grid[d][h] = SLEEP;
            }
        }
    };
    if amount <= wake {
        mark(day, wake - amount..wake);
    } else {
        mark(day, 0..wake);
        let spill = (amount - wake).min(24);
        mark((day + 6) % 7, 24 - spill..24);
    }
}

// ── Meals ─────────────────────────────────────────────────────────────────────

fn place_meals<R: RandomSource>(grid: &mut HourlyGrid, rng: &mut R) {
    for day in 0..7 {
        // Nobody sleeps past 14:00.
        let wake = grid[day][..15]
            .iter()
            .rposition(|&a| a == SLEEP)
            .map_or(0, |h| h + 1);

        for window in [wake..wake + 3, wake + 3..wake + 8, wake + 8..wake + 14] {
            let cells = window.map(|h| if h < 24 { (day, h) } else { ((day + 1) % 7, h - 24) });
            claim_any(grid, cells, MEAL, rng);
        }
    }
}

// ── Errands and study ─────────────────────────────────────────────────────────

fn place_errands<R: RandomSource>(grid: &mut HourlyGrid, activity: ActivityId, one_in: usize, rng: &mut R) {
    for day in 0..7 {
        if rng.index_below(one_in) == 0 {
            claim_any(grid, ERRAND_HOURS.iter().map(|&h| (day, h)), activity, rng);
        }
    }
}

fn place_study<R: RandomSource>(grid: &mut HourlyGrid, rng: &mut R) {
    for hour in grid.iter_mut().flatten() {
        if *hour == FREETIME && rng.index_below(4) == 0 {
            *hour = STUDY;
        }
    }
}
