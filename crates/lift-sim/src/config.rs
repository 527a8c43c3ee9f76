//! Building construction parameters.

use lift_core::FloorId;
use lift_dispatch::DispatchPolicy;
use lift_schedule::ActivitySpec;

/// One car of the fleet.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElevatorConfig {
    pub start_floor:   FloorId,
    pub capacity:      u32,
    /// Ticks a stop takes, at least 1.
    pub load_duration: u32,
    /// Overrides the policy's return floor for this car.
    #[cfg_attr(feature = "serde", serde(default))]
    pub return_to:     Option<FloorId>,
}

impl ElevatorConfig {
    pub fn new(start_floor: FloorId, capacity: u32, load_duration: u32) -> Self {
        Self { start_floor, capacity, load_duration, return_to: None }
    }

    pub fn returning_to(mut self, floor: FloorId) -> Self {
        self.return_to = Some(floor);
        self
    }
}

/// Everything needed to lay out a building.
///
/// Residents are created floor by floor: the `floor_populations[0]`
/// residents of the ground floor get the lowest ids, and so on up.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildingConfig {
    /// Residents living on each floor.  Its length is the floor count.
    pub floor_populations: Vec<u32>,
    /// Activity catalog, in `ActivityId` order.
    pub activities:        Vec<ActivitySpec>,
    pub policy:            DispatchPolicy,
    pub elevators:         Vec<ElevatorConfig>,
}

impl BuildingConfig {
    #[inline]
    pub fn floor_count(&self) -> usize {
        self.floor_populations.len()
    }

    pub fn population(&self) -> usize {
        self.floor_populations.iter().map(|&n| n as usize).sum()
    }

    /// Home floor of every resident, in id order.
    pub fn home_floors(&self) -> impl Iterator<Item = FloorId> + '_ {
        self.floor_populations
            .iter()
            .enumerate()
            .flat_map(|(f, &n)| std::iter::repeat_n(FloorId(f as u32), n as usize))
    }

    /// Same building with a different dispatch policy.
    pub fn with_policy(&self, policy: DispatchPolicy) -> Self {
        Self { policy, ..self.clone() }
    }
}
