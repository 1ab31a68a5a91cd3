//! Repository port for tasks and their cage links.

use crate::error::{Classify, ErrorKind};
use crate::persistence::PersistenceFailure;
use crate::task::domain::{Task, TaskFilter, TaskId, TaskTemplateId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores new tasks and their cage links atomically.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when any ID already
    /// exists; nothing is written in that case.
    async fn store_all(&self, tasks: &[Task]) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Persists a changed task if its stored revision still equals
    /// `expected_revision`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist and [`TaskRepositoryError::RevisionConflict`] when another
    /// writer changed it first.
    async fn update(&self, task: &Task, expected_revision: u32) -> TaskRepositoryResult<()>;

    /// Deletes a task and its cage links.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Returns every task matching the filter, ordered by scheduled time
    /// ascending.
    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns `true` when any task references the template.
    async fn references_template(&self, template_id: TaskTemplateId)
    -> TaskRepositoryResult<bool>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The stored task changed after it was read.
    #[error("task {task_id} was modified concurrently (expected revision {expected})")]
    RevisionConflict {
        /// The task being written.
        task_id: TaskId,
        /// Revision the writer read.
        expected: u32,
    },

    /// A referenced template, warehouse, employee or cage disappeared.
    #[error("task {0} references a record that no longer exists")]
    MissingReference(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PersistenceFailure for TaskRepositoryError {
    fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl Classify for TaskRepositoryError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateTask(_) | Self::RevisionConflict { .. } => ErrorKind::Conflict,
            Self::NotFound(_) | Self::MissingReference(_) => ErrorKind::NotFound,
            Self::Persistence(_) => ErrorKind::Persistence,
        }
    }
}
