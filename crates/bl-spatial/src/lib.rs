//! `bl-spatial`: neighbour queries over the path.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                      |
//! |-----------|---------------------------------------------------------------|
//! | [`index`] | `SpatialIndex` (R-tree keyed by store slot, periodic in `x`)  |
//! | [`error`] | `SpatialError`, `SpatialResult<T>`                            |

pub mod error;
pub mod index;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use index::SpatialIndex;
