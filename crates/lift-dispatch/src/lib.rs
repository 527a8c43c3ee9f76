//! `lift-dispatch`: dispatch policies and hall-call assignment.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`policy`]  | `DispatchPolicy` (`StayWhereStopped`, `ReturnTo(floor)`)   |
//! | [`assign`]  | `assign`, `assign_stop`, `Assignment`                      |
//! | [`error`]   | `DispatchError`, `DispatchResult<T>`                       |
//!
//! # Design notes
//!
//! Dispatch is greedy and myopic: each pending call is bound to one car the
//! moment some car is eligible, and the binding is never revisited.  A call
//! no car can take stays queued by the caller and is retried next tick.
//!
//! The dispatcher is stateless.  Everything it decides on lives in the
//! fleet's `Elevator` values, so assignment is a pure function of the fleet
//! and the call.

pub mod assign;
pub mod error;
pub mod policy;

#[cfg(test)]
mod tests;

pub use assign::{assign, assign_stop, Assignment};
pub use error::{DispatchError, DispatchResult};
pub use policy::DispatchPolicy;
