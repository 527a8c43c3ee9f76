//! The residence-hall scenario, built in or loaded from JSON.
//!
//! ```json
//! {
//!   "sim":        { "total_days": 2, "seed": 7, "verify_invariants": true },
//!   "building":   {
//!     "floor_populations": [0, 20, 20, 20],
//!     "activities": [ { "name": "freetime", "floors": [0, 1, 2, 3], "includes_home": false }, ... ],
//!     "policy":     "stay_where_stopped",
//!     "elevators":  [ { "start_floor": 0, "capacity": 10, "load_duration": 5 } ]
//!   },
//!   "policies":   ["stay_where_stopped", { "return_to": 0 }],
//!   "output_dir": "output/campus"
//! }
//! ```
//!
//! The activity catalog must list the eight timetable activities in
//! timetable order; only the floors may differ.
//!
//! Release builds skip the per-tick membership check unless
//! `sim.verify_invariants` is set, which is worth doing for short runs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use lift_core::{FloorId, SimConfig, SimRng};
use lift_dispatch::DispatchPolicy;
use lift_schedule::{ActivitySpec, WeeklySchedule, expand_hourly_grid};
use lift_sim::{BuildingConfig, ElevatorConfig};

use crate::timetable::{ACTIVITY_NAMES, student_week};

const FLOORS:              u32 = 15;
const RESIDENTIAL_FROM:    u32 = 4;
const RESIDENTS_PER_FLOOR: u32 = 100;
const CARS:                u32 = 3;

#[derive(Clone, Debug, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub sim:        SimConfig,
    pub building:   BuildingConfig,
    /// Each policy gets its own run over the same residents.
    #[serde(default = "default_policies")]
    pub policies:   Vec<DispatchPolicy>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_policies() -> Vec<DispatchPolicy> {
    vec![DispatchPolicy::StayWhereStopped, DispatchPolicy::ReturnTo(FloorId(0))]
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output/campus")
}

impl Scenario {
    /// Fifteen floors, the top eleven housing 100 students each, three
    /// ten-person cars parked in the lobby.
    pub fn residence_hall() -> Self {
        let floor_populations = (0..FLOORS)
            .map(|f| if f >= RESIDENTIAL_FROM { RESIDENTS_PER_FLOOR } else { 0 })
            .collect();
        let floors = |ids: &[u32]| ids.iter().copied().map(FloorId).collect::<Vec<_>>();

        let activities = vec![
            ActivitySpec::new("freetime", (0..FLOORS).map(FloorId).collect(), false),
            ActivitySpec::new("class", floors(&[0]), true),
            ActivitySpec::new("sleep", vec![], true),
            ActivitySpec::new("meal", floors(&[0]), true),
            ActivitySpec::new("exercise", floors(&[1]), true),
            ActivitySpec::new("shop", floors(&[0]), false),
            ActivitySpec::new("chores", vec![], true),
            ActivitySpec::new("study", floors(&[3]), true),
        ];

        Self {
            sim:        SimConfig::default(),
            building:   BuildingConfig {
                floor_populations,
                activities,
                policy:    DispatchPolicy::StayWhereStopped,
                elevators: (0..CARS).map(|_| ElevatorConfig::new(FloorId(0), 10, 5)).collect(),
            },
            policies:   default_policies(),
            output_dir: default_output_dir(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        let scenario: Scenario = serde_json::from_str(&text)
            .with_context(|| format!("parsing scenario {}", path.display()))?;
        scenario.check_catalog()?;
        Ok(scenario)
    }

    fn check_catalog(&self) -> Result<()> {
        let names: Vec<&str> = self.building.activities.iter().map(|a| a.name.as_str()).collect();
        ensure!(
            names == ACTIVITY_NAMES,
            "activities must be {ACTIVITY_NAMES:?} in that order, got {names:?}"
        );
        ensure!(!self.policies.is_empty(), "no policies to compare");
        Ok(())
    }

    /// One jittered weekly schedule per resident, reproducible from the
    /// scenario seed.
    pub fn schedules(&self) -> Vec<WeeklySchedule> {
        let mut master = SimRng::new(self.sim.seed);
        (0..self.building.population())
            .map(|i| {
                let mut rng = master.child(i as u64);
                let week = student_week(&mut rng);
                expand_hourly_grid(&week, self.sim.steps_per_hour, self.sim.steps_per_day, &mut rng)
            })
            .collect()
    }
}
