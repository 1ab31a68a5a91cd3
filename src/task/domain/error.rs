//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use crate::error::{Classify, ErrorKind};
use crate::facility::domain::CageId;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing or changing task domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The template name is empty after trimming.
    #[error("template name must not be empty")]
    EmptyTemplateName,

    /// The template name exceeds 100 characters.
    #[error("template name must be at most {max} characters")]
    TemplateNameTooLong {
        /// Maximum length in characters.
        max: usize,
    },

    /// No recurrence type was given.
    #[error("recurrence_type must not be empty")]
    MissingRecurrenceType,

    /// The recurrence type is not one of the supported values.
    #[error(transparent)]
    InvalidRecurrenceType(#[from] ParseRecurrenceTypeError),

    /// The status filter is not one of the lifecycle states.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),

    /// A timestamp does not use the wire format.
    #[error("invalid {field} '{value}', expected YYYY-MM-DD HH:MM:SS")]
    InvalidTimestamp {
        /// Field carrying the value.
        field: &'static str,
        /// Rejected input.
        value: String,
    },

    /// The date range ends before it starts.
    #[error("date range is inverted: {start} is after {end}")]
    InvertedDateRange {
        /// Lower bound.
        start: DateTime<Utc>,
        /// Upper bound.
        end: DateTime<Utc>,
    },

    /// A per-cage creation named no cages.
    #[error("cage_ids must contain at least one cage")]
    EmptyCageSelection,

    /// The same cage was named twice.
    #[error("cage {0} is listed more than once")]
    DuplicateCage(CageId),

    /// A cage belongs to a different warehouse than the task.
    #[error("cage {0} does not belong to the task's warehouse")]
    CageOutsideWarehouse(CageId),

    /// The requested status transition is not allowed.
    #[error("invalid state transition for task {task_id}: {from} -> {to}")]
    InvalidStateTransition {
        /// The task being transitioned.
        task_id: TaskId,
        /// The current status.
        from: TaskStatus,
        /// The requested target status.
        to: TaskStatus,
    },
}

impl Classify for TaskDomainError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidStateTransition { .. } => ErrorKind::InvalidState,
            _ => ErrorKind::Validation,
        }
    }
}

/// Error returned while parsing a recurrence type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown recurrence_type '{0}', expected none, daily, weekly or monthly")]
pub struct ParseRecurrenceTypeError(pub String);

/// Error returned while parsing a task status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
