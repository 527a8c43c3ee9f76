//! Core error type.
//!
//! Sub-crates define their own error enums and either convert into
//! `CoreError` or wrap it as one variant, whichever keeps error sites clean.

use thiserror::Error;

use crate::FloorId;

/// Errors raised by `lift-core` primitives.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("floor {floor} is outside a building of {floor_count} floors")]
    FloorOutOfRange { floor: FloorId, floor_count: usize },

    #[error("clock configuration error: {0}")]
    Clock(String),
}

/// Shorthand result type for `lift-core`.
pub type CoreResult<T> = Result<T, CoreError>;
