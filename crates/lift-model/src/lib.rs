//! `lift-model`: the building's entities.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`floor`]      | `Floor` (resident collections, hall-call flags)           |
//! | [`elevator`]   | `Elevator`, `ElevatorState`, `StopList`, `DeidleMarker`   |
//! | [`person`]     | `Person`, `Location`                                      |
//! | [`counters`]   | `ByPeriod<T>`, `ElevatorCounters`, `PersonCounters`       |
//!
//! Entities refer to each other only through typed ids (`FloorId`,
//! `ElevatorId`, `PersonId`).  The building in `lift-sim` owns one arena of
//! each and is the only place that moves a resident between collections.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on state enums and counters. |

pub mod counters;
pub mod elevator;
pub mod floor;
pub mod person;


pub use counters::{ByPeriod, ElevatorCounters, PersonCounters};
pub use elevator::{DeidleMarker, Elevator, ElevatorState, StateKind, StopList};
pub use floor::Floor;
pub use person::{Location, Person};
