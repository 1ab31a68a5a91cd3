//! Repository port for task templates.

use crate::error::{Classify, ErrorKind};
use crate::persistence::PersistenceFailure;
use crate::task::domain::{TaskTemplate, TaskTemplateId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for template repository operations.
pub type TaskTemplateRepositoryResult<T> = Result<T, TaskTemplateRepositoryError>;

/// Task template persistence contract.
#[async_trait]
pub trait TaskTemplateRepository: Send + Sync {
    /// Stores a new template.
    async fn store(&self, template: &TaskTemplate) -> TaskTemplateRepositoryResult<()>;

    /// Persists changed template fields.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTemplateRepositoryError::NotFound`] when the template
    /// does not exist.
    async fn update(&self, template: &TaskTemplate) -> TaskTemplateRepositoryResult<()>;

    /// Deletes a template.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTemplateRepositoryError::NotFound`] when the template
    /// does not exist, or [`TaskTemplateRepositoryError::StillReferenced`]
    /// when tasks point at it.
    async fn delete(&self, id: TaskTemplateId) -> TaskTemplateRepositoryResult<()>;

    /// Finds a template by identifier.
    async fn find_by_id(
        &self,
        id: TaskTemplateId,
    ) -> TaskTemplateRepositoryResult<Option<TaskTemplate>>;

    /// Returns templates in creation order, optionally restricted to
    /// recurring (`Some(true)`) or one-off (`Some(false)`) ones.
    async fn list(&self, recurring: Option<bool>)
    -> TaskTemplateRepositoryResult<Vec<TaskTemplate>>;
}

/// Errors returned by template repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskTemplateRepositoryError {
    /// A template with the same identifier already exists.
    #[error("duplicate task template identifier: {0}")]
    DuplicateTemplate(TaskTemplateId),

    /// The template was not found.
    #[error("task template not found: {0}")]
    NotFound(TaskTemplateId),

    /// Tasks still reference the template.
    #[error("task template {0} is still used by tasks and cannot be deleted")]
    StillReferenced(TaskTemplateId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PersistenceFailure for TaskTemplateRepositoryError {
    fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl Classify for TaskTemplateRepositoryError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateTemplate(_) | Self::StillReferenced(_) => ErrorKind::Conflict,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Persistence(_) => ErrorKind::Persistence,
        }
    }
}
