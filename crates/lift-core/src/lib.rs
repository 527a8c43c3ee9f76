//! `lift-core`: foundational types for the lift simulation workspace.
//!
//! Every other `lift-*` crate depends on this one.  It has no `lift-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `FloorId`, `ElevatorId`, `PersonId`, `ActivityId`     |
//! | [`direction`]   | `Direction` (`Up` / `Down`) and floor stepping        |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`, `Period`             |
//! | [`rng`]         | `RandomSource` trait, `SimRng`, `FirstChoice`         |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod direction;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use direction::Direction;
pub use error::{CoreError, CoreResult};
pub use ids::{ActivityId, ElevatorId, FloorId, PersonId};
pub use rng::{FirstChoice, RandomSource, SimRng};
pub use time::{Period, PeriodStamp, SimClock, SimConfig, Tick, Weekday};
