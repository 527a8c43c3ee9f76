//! The `Simulation` struct and its tick loop.

use tracing::{error, info, trace};

use lift_core::{Period, RandomSource, SimClock, SimConfig, SimRng, Tick};
use lift_schedule::DueQueue;

use crate::{invariants, Building, InvariantViolation, SimObserver, SimResult, TickSummary, ViolationKind};

// ── Simulation ────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Simulation<R>` holds all run state and drives the five-phase tick loop:
///
/// 1. **Intake**: residents whose scheduled state change is due take it,
///    pick a destination, and join a waiting queue if it is another floor.
/// 2. **Dispatch**: pending up calls, then pending down calls, are offered
///    to the fleet in FIFO order.
/// 3. **Advance**: every car moves one step, returning cars first, then
///    active, loading, and idle cars.
/// 4. **Count**: per-period step counters are incremented.
/// 5. **Verify** (optional): full membership check.
///
/// Period boundaries are reported to the observer after phase 5.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Simulation<R: RandomSource = SimRng> {
    /// Global configuration (clock, run length, seed, …).
    pub config: SimConfig,

    /// Simulation clock; tracks the current tick and maps it to day/hour.
    pub clock: SimClock,

    pub building: Building,

    /// Residents keyed by the tick of their next scheduled state change.
    /// Rebuilt at the first tick of every day.
    pub due: DueQueue,

    rng: R,
}

impl<R: RandomSource> Simulation<R> {
    pub(crate) fn new(config: SimConfig, building: Building, rng: R) -> Self {
        Self {
            clock: config.make_clock(),
            config,
            building,
            due: DueQueue::new(),
            rng,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            days = self.config.total_days,
            floors = self.building.floor_count(),
            elevators = self.building.elevators.len(),
            population = self.building.population(),
            policy = %self.building.policy,
            "simulation started"
        );
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        info!(tick = self.clock.current_tick.0, "simulation finished");
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Full membership check against the current state.
    pub fn verify(&self) -> Result<(), InvariantViolation> {
        invariants::verify(&self.building).map_err(|kind| self.violation(kind))
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        let summary = match self.process_tick(now) {
            Ok(summary) => summary,
            Err(violation) => {
                error!(%violation, "simulation aborted");
                return Err(violation.into());
            }
        };
        observer.on_tick_end(now, &summary);

        // Hourly before daily: the last hour of a day closes first.
        for period in [Period::Hourly, Period::Daily] {
            let ends = match period {
                Period::Hourly => self.clock.is_hour_end(),
                Period::Daily => self.clock.is_day_end(),
            };
            if ends {
                let stamp = self.clock.stamp(period);
                observer.on_period_end(&stamp, &self.building);
                self.building.reset_counters(period);
            }
        }

        self.clock.advance();
        Ok(())
    }

    fn process_tick(&mut self, now: Tick) -> Result<TickSummary, InvariantViolation> {
        let weekday = self.clock.weekday();
        let step = self.clock.step_of_day();
        let day_start = self.clock.day_start(self.clock.day());

        // ── Phase 1: scheduled state changes ──────────────────────────────
        if self.clock.is_day_start() {
            for person in &mut self.building.persons {
                person.cursor = 0;
            }
            self.due.rebuild_for_day(
                self.building.persons.iter().map(|p| p.schedule.as_ref()),
                weekday,
                day_start,
            );
            info!(day = self.clock.day(), weekday = weekday.abbreviation(), queued = self.due.len(), "day started");
        }

        let mut activated = 0;
        for id in self.due.drain_through(now) {
            let person = &mut self.building.persons[id.index()];
            // Residents in transit take their change once they are off the
            // car; see the alighting pass below.
            if !person.is_at_rest() {
                continue;
            }
            let Some(activity) = person.take_due(weekday, step) else {
                continue;
            };
            person.activity = activity;
            activated += 1;
            if let Some(next) = person.next_due_step(weekday) {
                self.due.push(day_start + next as u64, id);
            }
            let destination = self.rng.choose(person.floors_for(activity)).copied();
            if let Some(destination) = destination {
                self.building.send_waiting(id, destination);
            }
        }

        // ── Phase 2: dispatch ─────────────────────────────────────────────
        let bound = self.building.dispatch_pending();

        // ── Phase 3: advance the fleet ────────────────────────────────────
        let mut alighted = Vec::new();
        for idx in self.building.advance_order() {
            self.building
                .advance_car(idx, &mut alighted)
                .map_err(|kind| self.violation(kind))?;
        }
        for &id in &alighted {
            if self.building.persons[id.index()].has_due(weekday, step) {
                self.due.push(now + 1, id);
            }
        }

        // ── Phase 4: counters ─────────────────────────────────────────────
        self.building.record_step();

        // ── Phase 5: verification ─────────────────────────────────────────
        if self.config.verify_invariants {
            self.verify()?;
        }

        let summary = TickSummary {
            activated,
            bound,
            pending: self.building.pending_count(),
            alighted: alighted.len(),
        };
        trace!(tick = now.0, ?summary, "tick done");
        Ok(summary)
    }

    fn violation(&self, kind: ViolationKind) -> InvariantViolation {
        InvariantViolation { tick: self.clock.current_tick, day: self.clock.day(), kind }
    }
}
