//! Spatial-subsystem error type.

use thiserror::Error;

use bl_core::Position;

/// Errors produced by `bl-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("agent in slot {slot} has a non-finite position {pos}")]
    NonFinitePosition { slot: usize, pos: Position },

    #[error("query radius {0} must be finite and non-negative")]
    InvalidRadius(f64),

    #[error("period {0} must be finite and positive")]
    InvalidPeriod(f64),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
