use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("schedule parse error: {0}")]
    Parse(String),

    #[error("unknown activity {0:?}")]
    UnknownActivity(String),

    #[error("activity {0:?} is defined twice")]
    DuplicateActivity(String),

    #[error("day {day} is outside the 7-day week")]
    DayOutOfRange { day: u32 },

    #[error("step {step} is outside a day of {steps_per_day} steps")]
    StepOutOfRange { step: u32, steps_per_day: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
