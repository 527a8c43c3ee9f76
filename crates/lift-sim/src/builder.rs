//! Fluent builder for constructing a [`Simulation`].

use std::sync::Arc;

use tracing::info;

use lift_core::{ActivityId, ElevatorId, FloorId, PersonId, RandomSource, SimConfig, SimRng, Weekday};
use lift_dispatch::DispatchPolicy;
use lift_model::{Elevator, Floor, Person};
use lift_schedule::{ActivityCatalog, DestinationTable, WeeklySchedule};

use crate::{Building, BuildingConfig, ConfigError, SimResult, Simulation};

/// Fluent builder for [`Simulation<R>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: clock, run length, seed, verification switch
/// - [`BuildingConfig`]: floors, residents, activities, fleet, policy
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                                         |
/// |-------------------|-------------------------------------------------|
/// | `.schedules(v)`   | Every resident idle in `ActivityId(0)` all week |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, building)
///     .schedules(schedules)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:    SimConfig,
    building:  BuildingConfig,
    schedules: Option<Vec<WeeklySchedule>>,
}

impl SimBuilder {
    pub fn new(config: SimConfig, building: BuildingConfig) -> Self {
        Self { config, building, schedules: None }
    }

    /// Supply one weekly schedule per resident, in resident id order
    /// (must be length `population`).
    ///
    /// If not called, no resident ever moves.
    pub fn schedules(mut self, schedules: Vec<WeeklySchedule>) -> Self {
        self.schedules = Some(schedules);
        self
    }

    /// Validate inputs and return a simulation driven by a [`SimRng`]
    /// seeded from `config.seed`.
    pub fn build(self) -> SimResult<Simulation<SimRng>> {
        let rng = SimRng::new(self.config.seed);
        self.build_with_rng(rng)
    }

    /// Validate inputs and return a simulation driven by `rng`.
    pub fn build_with_rng<R: RandomSource>(self, rng: R) -> SimResult<Simulation<R>> {
        let building = self.assemble()?;
        info!(
            floors = building.floor_count(),
            elevators = building.elevators.len(),
            population = building.population(),
            policy = %building.policy,
            "building ready"
        );
        Ok(Simulation::new(self.config, building, rng))
    }

    fn assemble(&self) -> Result<Building, ConfigError> {
        self.config.validate()?;

        let cfg = &self.building;
        let floor_count = cfg.floor_count();
        if floor_count == 0 {
            return Err(ConfigError::NoFloors);
        }
        if cfg.elevators.is_empty() {
            return Err(ConfigError::NoElevators);
        }
        let in_range = |what: &'static str, floor: FloorId| {
            if floor.within(floor_count) {
                Ok(())
            } else {
                Err(ConfigError::FloorOutOfRange { what, floor, floor_count })
            }
        };

        // ── Fleet ─────────────────────────────────────────────────────────
        if let DispatchPolicy::ReturnTo(floor) = cfg.policy {
            in_range("policy return-to floor", floor)?;
        }
        let mut elevators = Vec::with_capacity(cfg.elevators.len());
        for (i, e) in cfg.elevators.iter().enumerate() {
            let id = ElevatorId(i as u32);
            in_range("start floor", e.start_floor)?;
            if let Some(floor) = e.return_to {
                in_range("return-to floor", floor)?;
            }
            if e.capacity == 0 {
                return Err(ConfigError::ZeroCapacity { car: id });
            }
            if e.load_duration == 0 {
                return Err(ConfigError::ZeroLoadDuration { car: id });
            }
            elevators.push(Elevator::new(id, floor_count, e.start_floor, e.capacity, e.load_duration, e.return_to));
        }

        // ── Activities ────────────────────────────────────────────────────
        let catalog = ActivityCatalog::from_specs(cfg.activities.iter().cloned())?;
        if let Some(floor) = catalog.highest_floor() {
            in_range("activity floor", floor)?;
        }

        // ── Schedules ─────────────────────────────────────────────────────
        let population = cfg.population();
        let schedules: Vec<Arc<WeeklySchedule>> = match &self.schedules {
            Some(s) => {
                if s.len() != population {
                    return Err(ConfigError::ScheduleCountMismatch { expected: population, got: s.len() });
                }
                s.iter().cloned().map(Arc::new).collect()
            }
            None => vec![Arc::new(WeeklySchedule::idle(ActivityId(0))); population],
        };
        for schedule in &schedules {
            check_activities(&catalog, schedule)?;
        }

        // ── Residents ─────────────────────────────────────────────────────
        //
        // Residents of one floor share a destination table.
        let tables: Vec<Arc<DestinationTable>> = (0..floor_count)
            .map(|f| Arc::new(DestinationTable::for_resident(&catalog, FloorId(f as u32))))
            .collect();
        let mut floors: Vec<Floor> = (0..floor_count).map(|f| Floor::new(FloorId(f as u32))).collect();
        let persons: Vec<Person> = cfg
            .home_floors()
            .zip(schedules)
            .enumerate()
            .map(|(i, (home, schedule))| {
                let id = PersonId(i as u32);
                floors[home.index()].at_rest.push(id);
                Person::new(id, home, schedule, Arc::clone(&tables[home.index()]))
            })
            .collect();

        Ok(Building::new(floors, elevators, persons, cfg.policy))
    }
}

/// Every activity a schedule names must be in the catalog.
fn check_activities(catalog: &ActivityCatalog, schedule: &WeeklySchedule) -> Result<(), ConfigError> {
    let initial = std::iter::once(schedule.initial_activity());
    let events = Weekday::ALL
        .into_iter()
        .flat_map(|d| schedule.day(d).iter().flat_map(|c| [c.from, c.to]));
    for activity in initial.chain(events) {
        if catalog.get(activity).is_none() {
            return Err(ConfigError::UnknownActivity { activity });
        }
    }
    Ok(())
}
