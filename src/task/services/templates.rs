//! Service layer for task template maintenance.

use crate::error::{Classify, ErrorKind};
use crate::task::{
    domain::{RecurrenceType, TaskDomainError, TaskTemplate, TaskTemplateId, TaskTemplateUpdate},
    ports::{
        TaskRepository, TaskRepositoryError, TaskTemplateRepository, TaskTemplateRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskTemplateRequest {
    name: String,
    description: String,
    recurrence_type: String,
    estimated_duration: Option<u32>,
}

impl CreateTaskTemplateRequest {
    /// Creates a request with the mandatory name and recurrence type.
    ///
    /// The recurrence type is parsed when the request is executed.
    #[must_use]
    pub fn new(name: impl Into<String>, recurrence_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            recurrence_type: recurrence_type.into(),
            estimated_duration: None,
        }
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the estimated duration in minutes.
    #[must_use]
    pub const fn with_estimated_duration(mut self, minutes: u32) -> Self {
        self.estimated_duration = Some(minutes);
        self
    }
}

/// Request payload for a partial template update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskTemplateRequest {
    name: Option<String>,
    description: Option<String>,
    recurrence_type: Option<String>,
    estimated_duration: Option<u32>,
}

impl UpdateTaskTemplateRequest {
    /// Creates an update that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the recurrence type.
    #[must_use]
    pub fn with_recurrence_type(mut self, recurrence_type: impl Into<String>) -> Self {
        self.recurrence_type = Some(recurrence_type.into());
        self
    }

    /// Replaces the estimated duration in minutes.
    #[must_use]
    pub const fn with_estimated_duration(mut self, minutes: u32) -> Self {
        self.estimated_duration = Some(minutes);
        self
    }

    fn into_update(self) -> Result<TaskTemplateUpdate, TaskDomainError> {
        let recurrence_type = self
            .recurrence_type
            .as_deref()
            .map(parse_recurrence)
            .transpose()?;
        Ok(TaskTemplateUpdate {
            name: self.name,
            description: self.description,
            recurrence_type,
            estimated_duration: self.estimated_duration,
        })
    }
}

/// Service-level errors for template operations.
#[derive(Debug, Error)]
pub enum TaskTemplateServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Template repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskTemplateRepositoryError),
    /// Task reference lookup failed.
    #[error(transparent)]
    Task(#[from] TaskRepositoryError),
}

impl Classify for TaskTemplateServiceError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::Repository(err) => err.kind(),
            Self::Task(err) => err.kind(),
        }
    }
}

/// Result type for template service operations.
pub type TaskTemplateServiceResult<T> = Result<T, TaskTemplateServiceError>;

/// Template orchestration service.
#[derive(Clone)]
pub struct TaskTemplateService<T, K, C>
where
    T: TaskTemplateRepository,
    K: TaskRepository,
    C: Clock + Send + Sync,
{
    templates: Arc<T>,
    tasks: Arc<K>,
    clock: Arc<C>,
}

impl<T, K, C> TaskTemplateService<T, K, C>
where
    T: TaskTemplateRepository,
    K: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a template service.
    #[must_use]
    pub const fn new(templates: Arc<T>, tasks: Arc<K>, clock: Arc<C>) -> Self {
        Self {
            templates,
            tasks,
            clock,
        }
    }

    /// Creates and stores a template.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTemplateServiceError::Domain`] when the name or
    /// recurrence type is blank or the recurrence type is unknown.
    pub async fn create_task_template(
        &self,
        request: CreateTaskTemplateRequest,
    ) -> TaskTemplateServiceResult<TaskTemplate> {
        let CreateTaskTemplateRequest {
            name,
            description,
            recurrence_type,
            estimated_duration,
        } = request;
        let recurrence = parse_recurrence(&recurrence_type)?;
        let template = TaskTemplate::new(
            name,
            description,
            recurrence,
            estimated_duration,
            &*self.clock,
        )?;
        self.templates.store(&template).await?;
        tracing::info!(
            template_id = %template.id(),
            recurrence_type = %recurrence,
            "task template created"
        );
        Ok(template)
    }

    /// Returns a template by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTemplateRepositoryError::NotFound`] (wrapped) when the
    /// template does not exist.
    pub async fn get_task_template(
        &self,
        id: TaskTemplateId,
    ) -> TaskTemplateServiceResult<TaskTemplate> {
        self.templates
            .find_by_id(id)
            .await?
            .ok_or_else(|| TaskTemplateRepositoryError::NotFound(id).into())
    }

    /// Applies a partial update to a template.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTemplateServiceError`] when the template is missing, a
    /// replacement value is invalid, or persistence fails.
    pub async fn update_task_template(
        &self,
        id: TaskTemplateId,
        request: UpdateTaskTemplateRequest,
    ) -> TaskTemplateServiceResult<TaskTemplate> {
        let update = request.into_update()?;
        let mut template = self.get_task_template(id).await?;
        template.apply(update, &*self.clock)?;
        self.templates.update(&template).await?;
        tracing::info!(template_id = %id, "task template updated");
        Ok(template)
    }

    /// Deletes a template that no task references.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTemplateRepositoryError::StillReferenced`] (wrapped)
    /// while tasks use the template, or a not-found error when it does not
    /// exist.
    pub async fn delete_task_template(&self, id: TaskTemplateId) -> TaskTemplateServiceResult<()> {
        self.get_task_template(id).await?;
        if self.tasks.references_template(id).await? {
            tracing::warn!(template_id = %id, "refusing to delete referenced task template");
            return Err(TaskTemplateRepositoryError::StillReferenced(id).into());
        }
        self.templates.delete(id).await?;
        tracing::info!(template_id = %id, "task template deleted");
        Ok(())
    }

    /// Returns templates, optionally only recurring or only one-off ones.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTemplateServiceError::Repository`] when persistence
    /// lookup fails.
    pub async fn list_task_templates(
        &self,
        recurring: Option<bool>,
    ) -> TaskTemplateServiceResult<Vec<TaskTemplate>> {
        tracing::debug!(?recurring, "listing task templates");
        Ok(self.templates.list(recurring).await?)
    }
}

fn parse_recurrence(value: &str) -> Result<RecurrenceType, TaskDomainError> {
    if value.trim().is_empty() {
        return Err(TaskDomainError::MissingRecurrenceType);
    }
    Ok(RecurrenceType::try_from(value)?)
}
