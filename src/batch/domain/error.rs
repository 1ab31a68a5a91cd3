//! Error types for batch domain validation.

use crate::error::{Classify, ErrorKind};
use thiserror::Error;

/// Errors returned while constructing batch domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BatchDomainError {
    /// A batch must contain at least one collar.
    #[error("collar count must be greater than zero")]
    ZeroCollarCount,

    /// The requested count exceeds the configured ceiling.
    #[error("collar count {requested} exceeds the maximum of {max}")]
    TooManyCollars {
        /// Requested collar count.
        requested: u32,
        /// Largest accepted collar count.
        max: u32,
    },

    /// The collar code is not 32 hexadecimal characters.
    #[error("invalid collar code: {0}")]
    InvalidCollarCode(String),
}

impl Classify for BatchDomainError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}
