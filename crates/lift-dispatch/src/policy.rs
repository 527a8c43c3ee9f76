//! Dispatch policies.

use std::fmt;
use std::str::FromStr;

use lift_core::{Direction, FloorId};
use lift_model::{Elevator, ElevatorState};

use crate::DispatchError;

/// What a car does once it has no stops left, and which cars the
/// assignment algorithm may consider.
///
/// Both policies share the same assignment core; `ReturnTo` additionally
/// lets the dispatcher reclaim cars that are on their way home.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DispatchPolicy {
    /// Park wherever the last stop was.
    StayWhereStopped,
    /// Head back to a home floor.  The floor given here is the building-wide
    /// default; a car may override it with its own return floor.
    ReturnTo(FloorId),
}

impl DispatchPolicy {
    /// `true` if returning cars may be reassigned to new calls.
    #[inline]
    pub fn reclaims_returning(self) -> bool {
        matches!(self, DispatchPolicy::ReturnTo(_))
    }

    /// Return floor for a car under this policy, if any.
    pub fn return_floor(self, car_override: Option<FloorId>) -> Option<FloorId> {
        match self {
            DispatchPolicy::StayWhereStopped => None,
            DispatchPolicy::ReturnTo(default) => Some(car_override.unwrap_or(default)),
        }
    }

    /// State for a car that just finished its last stop.
    ///
    /// `StayWhereStopped` parks the car.  `ReturnTo` parks it when it is
    /// already home, and otherwise sends it home.
    pub fn park(self, car: &Elevator) -> ElevatorState {
        match self {
            DispatchPolicy::StayWhereStopped => ElevatorState::Idle,
            DispatchPolicy::ReturnTo(default) => {
                let home = car.return_to.unwrap_or(default);
                if car.floor == home {
                    ElevatorState::Idle
                } else {
                    ElevatorState::Returning(Direction::toward(car.floor, home))
                }
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DispatchPolicy::StayWhereStopped => "stay_where_stopped",
            DispatchPolicy::ReturnTo(_) => "return_to",
        }
    }
}

impl fmt::Display for DispatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchPolicy::StayWhereStopped => f.write_str("stay_where_stopped"),
            DispatchPolicy::ReturnTo(floor) => write!(f, "return_to:{}", floor.0),
        }
    }
}

/// Parses `stay_where_stopped`, `return_to` (ground floor) or
/// `return_to:<floor>`.
impl FromStr for DispatchPolicy {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "stay_where_stopped" => Ok(DispatchPolicy::StayWhereStopped),
            "return_to" => Ok(DispatchPolicy::ReturnTo(FloorId(0))),
            other => other
                .strip_prefix("return_to:")
                .and_then(|n| n.parse::<u32>().ok())
                .map(|n| DispatchPolicy::ReturnTo(FloorId(n)))
                .ok_or_else(|| DispatchError::UnknownPolicy(other.to_owned())),
        }
    }
}
