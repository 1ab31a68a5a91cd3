//! Crate-wide error classification.
//!
//! Each bounded context keeps its own layered error enums. At the response
//! boundary every error is reduced to one of the [`ErrorKind`] classes so
//! callers can log and map failures without matching on context-specific
//! variants.

use serde::Serialize;
use std::fmt;

/// Coarse failure class shared by all contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A field was missing or malformed.
    Validation,
    /// A referenced record does not exist.
    NotFound,
    /// The requested status transition is not allowed.
    InvalidState,
    /// A uniqueness, reference or revision constraint was violated.
    Conflict,
    /// The storage layer failed.
    Persistence,
}

impl ErrorKind {
    /// Returns the canonical lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::InvalidState => "invalid_state",
            Self::Conflict => "conflict",
            Self::Persistence => "persistence",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps an error onto its [`ErrorKind`].
pub trait Classify {
    /// Returns the failure class of this error.
    fn kind(&self) -> ErrorKind;
}
