use lift_core::{ActivityId, CoreError, Direction, ElevatorId, FloorId, PersonId, Tick};
use lift_model::Location;
use lift_schedule::ScheduleError;
use thiserror::Error;

// ── Construction ──────────────────────────────────────────────────────────────

/// A building configuration the engine refuses to run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("building has no floors")]
    NoFloors,

    #[error("building has no elevators")]
    NoElevators,

    #[error("{what} {floor} is outside a building of {floor_count} floors")]
    FloorOutOfRange {
        what:        &'static str,
        floor:       FloorId,
        floor_count: usize,
    },

    #[error("elevator {car} has a load duration of zero")]
    ZeroLoadDuration { car: ElevatorId },

    #[error("elevator {car} has a capacity of zero")]
    ZeroCapacity { car: ElevatorId },

    #[error("got {got} schedules for a population of {expected}")]
    ScheduleCountMismatch { expected: usize, got: usize },

    #[error("schedule refers to {activity}, which is not in the activity catalog")]
    UnknownActivity { activity: ActivityId },

    #[error(transparent)]
    Clock(#[from] CoreError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

// ── Runtime ───────────────────────────────────────────────────────────────────

/// What went wrong in an [`InvariantViolation`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViolationKind {
    #[error("elevator {car} at {from} cannot move {direction}")]
    CarLeftShaft {
        car:       ElevatorId,
        from:      FloorId,
        direction: Direction,
    },

    #[error("{person} is in no collection")]
    PersonMissing { person: PersonId },

    #[error("{person} is in {count} collections")]
    PersonDuplicated { person: PersonId, count: u32 },

    #[error("{person} is tagged {location:?} but held by {held:?}")]
    LocationMismatch {
        person:   PersonId,
        location: Location,
        held:     Location,
    },

    #[error("{person} rides elevator {car} in the {slot} slot but is bound for {destination}")]
    RiderMisrouted {
        car:         ElevatorId,
        person:      PersonId,
        slot:        FloorId,
        destination: FloorId,
    },

    #[error("{person} boarding elevator {car} is bound for {destination}, which the car cannot reach")]
    RiderUnroutable {
        car:         ElevatorId,
        person:      PersonId,
        destination: FloorId,
    },

    #[error("elevator {car} carries riders for {floor} but owes no stop there")]
    RiderWithoutStop { car: ElevatorId, floor: FloorId },
}

/// A broken engine invariant.  Always fatal.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invariant violated at {tick} (day {day}): {kind}")]
pub struct InvariantViolation {
    pub tick: Tick,
    pub day:  u64,
    pub kind: ViolationKind,
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

pub type SimResult<T> = Result<T, SimError>;
