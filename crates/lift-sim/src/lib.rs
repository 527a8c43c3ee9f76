//! `lift-sim`: the building and its tick engine.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks():
//!   ① Intake    at day start rebuild the due queue; every at-rest resident
//!                due a state change takes it, picks a destination, and
//!                queues for a car when the destination is another floor.
//!   ② Dispatch  offer pending up calls, then down calls, to the fleet;
//!                calls no car can take stay queued in order.
//!   ③ Advance   returning → active → loading → idle cars, one step each.
//!   ④ Count     per-period step counters for cars and residents.
//!   ⑤ Verify    (optional) full membership check, fatal on failure.
//!   hour / day end → observer.on_period_end(), then reset that period.
//! ```
//!
//! # Crate layout
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`config`]      | `BuildingConfig`, `ElevatorConfig`                    |
//! | [`building`]    | `Building`: arenas, pending calls, car advancement    |
//! | [`builder`]     | `SimBuilder` (validation, resident layout)            |
//! | [`sim`]         | `Simulation` and the tick loop                        |
//! | [`observer`]    | `SimObserver`, `NoopObserver`, `TickSummary`          |
//! | [`invariants`]  | `verify` membership check                             |
//! | [`batch`]       | `run_isolated` for independent runs                   |
//! | [`error`]       | `ConfigError`, `InvariantViolation`, `SimError`       |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | `run_isolated` runs scenarios on Rayon's thread pool.  |
//! | `serde`    | Derives `Serialize`/`Deserialize` on the config types. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lift_core::SimConfig;
//! use lift_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), building)
//!     .schedules(schedules)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod batch;
pub mod builder;
pub mod building;
pub mod config;
pub mod error;
pub mod invariants;
pub mod observer;
pub mod sim;


pub use batch::run_isolated;
pub use builder::SimBuilder;
pub use building::Building;
pub use config::{BuildingConfig, ElevatorConfig};
pub use error::{ConfigError, InvariantViolation, SimError, SimResult, ViolationKind};
pub use observer::{NoopObserver, SimObserver, TickSummary};
pub use sim::Simulation;
