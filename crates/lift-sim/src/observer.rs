//! Simulation observer trait for progress reporting and data collection.

use lift_core::{PeriodStamp, Tick};

use crate::Building;

/// What happened during one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Residents whose activity changed this tick.
    pub activated: usize,
    /// Pending calls bound to a car this tick.
    pub bound:     usize,
    /// Calls still unbound after dispatch.
    pub pending:   usize,
    /// Residents who got off a car this tick.
    pub alighted:  usize,
}

/// Callbacks invoked by [`Simulation::run`][crate::Simulation::run] at key
/// points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: daily progress printer
///
/// ```rust,ignore
/// struct DayPrinter;
///
/// impl SimObserver for DayPrinter {
///     fn on_period_end(&mut self, stamp: &PeriodStamp, building: &Building) {
///         if stamp.period == Period::Daily {
///             println!("day {} done, {} waiting", stamp.day, building.waiting_count());
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick, after counters are updated.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}

    /// Called on the last tick of every hour and every day, hourly first.
    ///
    /// The counters for `stamp.period` hold exactly that period's steps.
    /// The engine zeroes them as soon as this returns, so anything worth
    /// keeping must be copied out here.
    fn on_period_end(&mut self, _stamp: &PeriodStamp, _building: &Building) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
