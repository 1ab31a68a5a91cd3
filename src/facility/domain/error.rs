//! Error types for facility domain validation.

use crate::error::{Classify, ErrorKind};
use thiserror::Error;

/// Errors returned while constructing facility records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FacilityDomainError {
    /// The warehouse name is blank.
    #[error("warehouse name must not be empty")]
    EmptyWarehouseName,

    /// The cage code is blank.
    #[error("cage code must not be empty")]
    EmptyCageCode,

    /// The cage status is blank.
    #[error("cage status must not be empty")]
    EmptyCageStatus,

    /// The employee name is blank.
    #[error("employee name must not be empty")]
    EmptyEmployeeName,

    /// The employee phone is blank.
    #[error("employee phone must not be empty")]
    EmptyEmployeePhone,

    /// The employee role is blank.
    #[error("employee role must not be empty")]
    EmptyEmployeeRole,

    /// A text field exceeds its stored column width.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Offending field.
        field: &'static str,
        /// Maximum length in characters.
        max: usize,
    },
}

impl Classify for FacilityDomainError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}
