//! Plain data row types written by output backends, and the aggregation
//! that produces them.
//!
//! # Averages
//!
//! ```text
//! fleet mean      = Σ car counter        / car count
//! population mean = Σ resident counter   / population   (idle residents count as 0)
//! share of period = fleet mean / period ticks × 100
//! ```

use lift_core::{Period, PeriodStamp, Weekday};
use lift_sim::Building;

/// Building-wide averages for one completed period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodSummaryRow {
    pub period:         Period,
    pub day:            u64,
    pub weekday:        Weekday,
    /// `None` for daily rows.
    pub hour:           Option<u32>,
    pub ticks:          u64,

    /// Mean steps per car in each state.
    pub idle_steps:      f64,
    pub active_steps:    f64,
    pub loading_steps:   f64,
    pub returning_steps: f64,

    /// Mean steps per resident spent waiting for and riding a car.
    pub waiting_steps:  f64,
    pub riding_steps:   f64,
    pub waiting_secs:   f64,
    pub riding_secs:    f64,

    /// Residents that waited or rode at all during the period.
    pub travelers:      u64,
}

impl PeriodSummaryRow {
    /// Average the `stamp.period` counters of `building`.
    pub fn summarize(stamp: &PeriodStamp, building: &Building, seconds_per_step: f64) -> Self {
        let cars = building.elevators.len().max(1) as f64;
        let (mut idle, mut active, mut loading, mut returning) = (0u64, 0u64, 0u64, 0u64);
        for car in &building.elevators {
            let c = car.counters.get(stamp.period);
            idle += c.idle;
            active += c.active;
            loading += c.loading;
            returning += c.returning;
        }

        let population = building.persons.len().max(1) as f64;
        let (mut waiting, mut riding, mut travelers) = (0u64, 0u64, 0u64);
        for person in &building.persons {
            let c = person.counters.get(stamp.period);
            waiting += c.waiting;
            riding += c.riding;
            if c.waiting + c.riding > 0 {
                travelers += 1;
            }
        }
        let waiting_steps = waiting as f64 / population;
        let riding_steps = riding as f64 / population;

        Self {
            period: stamp.period,
            day: stamp.day,
            weekday: stamp.weekday,
            hour: stamp.hour,
            ticks: stamp.ticks,
            idle_steps: idle as f64 / cars,
            active_steps: active as f64 / cars,
            loading_steps: loading as f64 / cars,
            returning_steps: returning as f64 / cars,
            waiting_steps,
            riding_steps,
            waiting_secs: waiting_steps * seconds_per_step,
            riding_secs: riding_steps * seconds_per_step,
            travelers,
        }
    }

    /// `steps` as a percentage of the period.
    #[inline]
    pub fn share(&self, steps: f64) -> f64 {
        if self.ticks == 0 { 0.0 } else { steps / self.ticks as f64 * 100.0 }
    }
}

/// One car's counters for one completed period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElevatorPeriodRow {
    pub period:    Period,
    pub day:       u64,
    pub hour:      Option<u32>,
    pub elevator:  u32,
    pub idle:      u64,
    pub active:    u64,
    pub loading:   u64,
    pub returning: u64,
}

impl ElevatorPeriodRow {
    /// One row per car of `building`, in fleet order.
    pub fn collect(stamp: &PeriodStamp, building: &Building) -> Vec<Self> {
        building
            .elevators
            .iter()
            .map(|car| {
                let c = car.counters.get(stamp.period);
                Self {
                    period:    stamp.period,
                    day:       stamp.day,
                    hour:      stamp.hour,
                    elevator:  car.id.0,
                    idle:      c.idle,
                    active:    c.active,
                    loading:   c.loading,
                    returning: c.returning,
                }
            })
            .collect()
    }
}
