//! Core error type.
//!
//! Sub-crates define their own error enums; `SimError` in `bl-sim` wraps
//! them all.  `BlError` covers the configuration checks that live here.

use thiserror::Error;

use crate::AgentTag;

/// The error type for `bl-core`.
#[derive(Debug, Error)]
pub enum BlError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentTag),

    #[error("agent {0} is already present")]
    DuplicateAgent(AgentTag),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `bl-core`.
pub type BlResult<T> = Result<T, BlError>;
