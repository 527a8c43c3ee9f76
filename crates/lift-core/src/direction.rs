//! Travel direction for hall calls, stop lists, and car movement.

use std::fmt;

use crate::FloorId;

/// Vertical travel direction.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub const BOTH: [Direction; 2] = [Direction::Up, Direction::Down];

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Direction of travel from `from` to reach `to`.
    ///
    /// Equal floors resolve to `Down`; callers that care about the
    /// stationary case must check it first.
    #[inline]
    pub fn toward(from: FloorId, to: FloorId) -> Direction {
        if from < to { Direction::Up } else { Direction::Down }
    }

    /// The floor one step in this direction, or `None` when that would
    /// leave `[0, floor_count)`.
    #[inline]
    pub fn step(self, from: FloorId, floor_count: usize) -> Option<FloorId> {
        let next = match self {
            Direction::Up => from.0.checked_add(1)?,
            Direction::Down => from.0.checked_sub(1)?,
        };
        let next = FloorId(next);
        next.within(floor_count).then_some(next)
    }

    /// `true` if a car at `car` moving in this direction has `target`
    /// strictly ahead of it.
    #[inline]
    pub fn approaches(self, car: FloorId, target: FloorId) -> bool {
        match self {
            Direction::Up => car < target,
            Direction::Down => car > target,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => f.write_str("up"),
            Direction::Down => f.write_str("down"),
        }
    }
}
