//! Error types for merchant domain validation.

use crate::error::{Classify, ErrorKind};
use thiserror::Error;

/// Errors returned while constructing merchant domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MerchantDomainError {
    /// The merchant name is empty after trimming.
    #[error("merchant name must not be empty")]
    EmptyName,

    /// The contact person is empty after trimming.
    #[error("merchant contact person must not be empty")]
    EmptyContactPerson,

    /// The phone number is empty after trimming.
    #[error("merchant phone must not be empty")]
    EmptyPhone,

    /// A field exceeds its stored column width.
    #[error("merchant {field} must be at most {max} characters")]
    TooLong {
        /// Offending field.
        field: &'static str,
        /// Maximum length in characters.
        max: usize,
    },

    /// The search keyword is empty after trimming.
    #[error("search keyword must not be empty")]
    EmptySearchKeyword,
}

impl Classify for MerchantDomainError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}
