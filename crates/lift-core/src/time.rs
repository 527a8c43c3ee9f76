//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter; one tick is one
//! simulation step.  A day is `steps_per_day` ticks and an hour is
//! `steps_per_hour` ticks.  The default step is 3.5 s, so a day is
//! 24 686 steps and an hour 1 028 steps:
//!
//! ```text
//! day         = tick / steps_per_day
//! step_of_day = tick % steps_per_day
//! hour        = min(step_of_day / steps_per_hour, 23)
//! ```
//!
//! Because `24 * steps_per_hour` need not divide the day exactly, the last
//! hour absorbs the remainder.  Day 0 is a Sunday; schedules repeat weekly.

use std::fmt;

use crate::{CoreError, CoreResult};

/// Hours in a simulated day.
pub const HOURS_PER_DAY: u32 = 24;

/// Days in a schedule cycle.
pub const DAYS_PER_WEEK: usize = 7;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── Weekday ───────────────────────────────────────────────────────────────────

/// Day of the schedule week.  Index 0 is Sunday.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; DAYS_PER_WEEK] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Weekday of absolute day number `day` (day 0 is Sunday).
    #[inline]
    pub fn of_day(day: u64) -> Weekday {
        Self::ALL[(day % DAYS_PER_WEEK as u64) as usize]
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            Weekday::Sunday => "Su",
            Weekday::Monday => "M",
            Weekday::Tuesday => "T",
            Weekday::Wednesday => "W",
            Weekday::Thursday => "Tr",
            Weekday::Friday => "F",
            Weekday::Saturday => "Sa",
        }
    }
}

// ── Accounting periods ────────────────────────────────────────────────────────

/// An accounting window over which step counters are summed, then reset.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Period {
    Daily,
    Hourly,
}

impl Period {
    pub const ALL: [Period; 2] = [Period::Daily, Period::Hourly];

    /// Slot index for per-period counter arrays.
    #[inline]
    pub fn slot(self) -> usize {
        match self {
            Period::Daily => 0,
            Period::Hourly => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Hourly => "hourly",
        }
    }
}

/// Identifies one completed accounting period.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct PeriodStamp {
    pub period:   Period,
    /// Absolute day number (0-based).
    pub day:      u64,
    pub weekday:  Weekday,
    /// Hour of day for `Hourly` periods, `None` for `Daily`.
    pub hour:     Option<u32>,
    /// Number of ticks the period spanned.
    pub ticks:    u64,
    /// The last tick included in the period.
    pub end_tick: Tick,
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Maps absolute ticks to day / weekday / step-of-day / hour.
///
/// `SimClock` is cheap to clone and holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    pub steps_per_day:  u32,
    pub steps_per_hour: u32,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick:   Tick,
}

impl SimClock {
    pub fn new(steps_per_day: u32, steps_per_hour: u32) -> Self {
        Self { steps_per_day, steps_per_hour, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    #[inline]
    pub fn day(&self) -> u64 {
        self.current_tick.0 / self.steps_per_day as u64
    }

    #[inline]
    pub fn weekday(&self) -> Weekday {
        Weekday::of_day(self.day())
    }

    #[inline]
    pub fn step_of_day(&self) -> u32 {
        (self.current_tick.0 % self.steps_per_day as u64) as u32
    }

    #[inline]
    pub fn hour_of_day(&self) -> u32 {
        self.hour_of_step(self.step_of_day())
    }

    /// Hour containing `step`; the last hour absorbs any remainder steps.
    #[inline]
    pub fn hour_of_step(&self, step: u32) -> u32 {
        (step / self.steps_per_hour).min(HOURS_PER_DAY - 1)
    }

    /// First tick of absolute day `day`.
    #[inline]
    pub fn day_start(&self, day: u64) -> Tick {
        Tick(day * self.steps_per_day as u64)
    }

    #[inline]
    pub fn is_day_start(&self) -> bool {
        self.step_of_day() == 0
    }

    #[inline]
    pub fn is_day_end(&self) -> bool {
        self.step_of_day() + 1 == self.steps_per_day
    }

    /// `true` on the last tick of an hour (including the last tick of a day).
    pub fn is_hour_end(&self) -> bool {
        if self.is_day_end() {
            return true;
        }
        let step = self.step_of_day();
        self.hour_of_step(step + 1) != self.hour_of_step(step)
    }

    /// Number of ticks in hour `hour` of any day.
    pub fn hour_len(&self, hour: u32) -> u64 {
        if hour + 1 < HOURS_PER_DAY {
            self.steps_per_hour as u64
        } else {
            (self.steps_per_day - (HOURS_PER_DAY - 1) * self.steps_per_hour) as u64
        }
    }

    /// Stamp describing the period of kind `period` that ends on the
    /// current tick.  Only meaningful when that period actually ends here.
    pub fn stamp(&self, period: Period) -> PeriodStamp {
        let (hour, ticks) = match period {
            Period::Daily => (None, self.steps_per_day as u64),
            Period::Hourly => {
                let h = self.hour_of_day();
                (Some(h), self.hour_len(h))
            }
        };
        PeriodStamp {
            period,
            day: self.day(),
            weekday: self.weekday(),
            hour,
            ticks,
            end_tick: self.current_tick,
        }
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (day {} {} step {} hour {:02})",
            self.current_tick,
            self.day(),
            self.weekday().abbreviation(),
            self.step_of_day(),
            self.hour_of_day()
        )
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically loaded from a JSON file by the application crate and passed
/// to the simulation builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Real seconds one step represents.  Only used when presenting results.
    pub seconds_per_step: f64,

    /// Ticks per simulated day.
    pub steps_per_day: u32,

    /// Ticks per simulated hour.  `24 * steps_per_hour` must not exceed
    /// `steps_per_day`.
    pub steps_per_hour: u32,

    /// Number of days to simulate.
    pub total_days: u32,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Run the full membership check after every tick.  Costs O(persons)
    /// per tick.
    ///
    /// Defaults to on in debug builds only, so `--release` and
    /// `--profile fast` runs skip the check unless a scenario sets it.  Cars
    /// leaving the shaft and unroutable riders are caught either way.
    pub verify_invariants: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seconds_per_step:  3.5,
            steps_per_day:     24_686,
            steps_per_hour:    1_028,
            total_days:        7,
            seed:              42,
            verify_invariants: cfg!(debug_assertions),
        }
    }
}

impl SimConfig {
    /// Total ticks in the run.
    #[inline]
    pub fn total_ticks(&self) -> u64 {
        self.total_days as u64 * self.steps_per_day as u64
    }

    /// The tick at which the run ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks())
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.steps_per_day, self.steps_per_hour)
    }

    /// Convert a step count to seconds.
    #[inline]
    pub fn steps_to_secs(&self, steps: f64) -> f64 {
        steps * self.seconds_per_step
    }

    /// Reject clock parameters the time model cannot represent.
    pub fn validate(&self) -> CoreResult<()> {
        if self.steps_per_day == 0 || self.steps_per_hour == 0 {
            return Err(CoreError::Clock(
                "steps_per_day and steps_per_hour must be non-zero".into(),
            ));
        }
        if self.steps_per_hour as u64 * HOURS_PER_DAY as u64 > self.steps_per_day as u64 {
            return Err(CoreError::Clock(format!(
                "{} hours of {} steps exceed a day of {} steps",
                HOURS_PER_DAY, self.steps_per_hour, self.steps_per_day
            )));
        }
        if !(self.seconds_per_step > 0.0) {
            return Err(CoreError::Clock("seconds_per_step must be positive".into()));
        }
        Ok(())
    }
}
