//! Service layer for creating, progressing and querying tasks.
//!
//! [`TaskLifecycleService`] resolves every reference a task carries before
//! storing it, and writes status changes with an optimistic revision check
//! so two concurrent transitions of the same task cannot both succeed.

use crate::error::{Classify, ErrorKind};
use crate::facility::{
    domain::{CageId, EmployeeId, WarehouseId},
    ports::{FacilityRepository, FacilityRepositoryError},
};
use crate::task::{
    domain::{
        NewTask, Task, TaskDetail, TaskDomainError, TaskFilter, TaskId, TaskStatus, TaskTemplate,
        TaskTemplateId,
    },
    ports::{
        TaskRepository, TaskRepositoryError, TaskTemplateRepository, TaskTemplateRepositoryError,
    },
};
use crate::timestamp;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating one task per cage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTasksForCagesRequest {
    template_id: TaskTemplateId,
    warehouse_id: WarehouseId,
    assignee_id: EmployeeId,
    scheduled_time: String,
    cage_ids: Vec<CageId>,
}

impl CreateTasksForCagesRequest {
    /// Creates a request. `scheduled_time` uses `YYYY-MM-DD HH:MM:SS`.
    #[must_use]
    pub fn new(
        template_id: TaskTemplateId,
        warehouse_id: WarehouseId,
        assignee_id: EmployeeId,
        scheduled_time: impl Into<String>,
        cage_ids: Vec<CageId>,
    ) -> Self {
        Self {
            template_id,
            warehouse_id,
            assignee_id,
            scheduled_time: scheduled_time.into(),
            cage_ids,
        }
    }
}

/// Request payload for creating a single task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    template_id: TaskTemplateId,
    warehouse_id: WarehouseId,
    assignee_id: EmployeeId,
    scheduled_time: String,
    cage_id: Option<CageId>,
}

impl CreateTaskRequest {
    /// Creates a request for a task not linked to any cage.
    #[must_use]
    pub fn new(
        template_id: TaskTemplateId,
        warehouse_id: WarehouseId,
        assignee_id: EmployeeId,
        scheduled_time: impl Into<String>,
    ) -> Self {
        Self {
            template_id,
            warehouse_id,
            assignee_id,
            scheduled_time: scheduled_time.into(),
            cage_id: None,
        }
    }

    /// Links the task to one cage.
    #[must_use]
    pub const fn with_cage(mut self, cage_id: CageId) -> Self {
        self.cage_id = Some(cage_id);
        self
    }
}

/// Task list query as received from callers.
///
/// Status and date bounds arrive as text and are validated when the query
/// runs. Date bounds accept a full timestamp or a bare `YYYY-MM-DD` date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListQuery {
    status: Option<String>,
    assignee_id: Option<EmployeeId>,
    warehouse_id: Option<WarehouseId>,
    template_id: Option<TaskTemplateId>,
    start_date: Option<String>,
    end_date: Option<String>,
}

impl TaskListQuery {
    /// Creates a query that matches every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one status (`PENDING`, `IN_PROGRESS` or `COMPLETED`).
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Restricts to one assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: EmployeeId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Restricts to one warehouse.
    #[must_use]
    pub const fn with_warehouse(mut self, warehouse_id: WarehouseId) -> Self {
        self.warehouse_id = Some(warehouse_id);
        self
    }

    /// Restricts to one template.
    #[must_use]
    pub const fn with_template(mut self, template_id: TaskTemplateId) -> Self {
        self.template_id = Some(template_id);
        self
    }

    /// Sets the inclusive lower bound on scheduled time.
    #[must_use]
    pub fn with_start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = Some(start_date.into());
        self
    }

    /// Sets the inclusive upper bound on scheduled time.
    #[must_use]
    pub fn with_end_date(mut self, end_date: impl Into<String>) -> Self {
        self.end_date = Some(end_date.into());
        self
    }

    fn into_filter(self) -> Result<TaskFilter, TaskDomainError> {
        let status = self
            .status
            .as_deref()
            .map(TaskStatus::try_from)
            .transpose()?;
        let scheduled_from = self
            .start_date
            .as_deref()
            .map(|value| {
                timestamp::parse_range_start(value).map_err(|_| invalid_timestamp("start_date", value))
            })
            .transpose()?;
        let scheduled_to = self
            .end_date
            .as_deref()
            .map(|value| {
                timestamp::parse_range_end(value).map_err(|_| invalid_timestamp("end_date", value))
            })
            .transpose()?;
        let filter = TaskFilter {
            status,
            assignee_id: self.assignee_id,
            warehouse_id: self.warehouse_id,
            template_id: self.template_id,
            scheduled_from,
            scheduled_to,
        };
        filter.validate()?;
        Ok(filter)
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation or a state transition failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Template lookup failed.
    #[error(transparent)]
    Template(#[from] TaskTemplateRepositoryError),
    /// Warehouse, employee or cage lookup failed.
    #[error(transparent)]
    Facility(#[from] FacilityRepositoryError),
}

impl Classify for TaskLifecycleError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::Repository(err) => err.kind(),
            Self::Template(err) => err.kind(),
            Self::Facility(err) => err.kind(),
        }
    }
}

/// Result type for task lifecycle operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<K, T, F, C>
where
    K: TaskRepository,
    T: TaskTemplateRepository,
    F: FacilityRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<K>,
    templates: Arc<T>,
    facility: Arc<F>,
    clock: Arc<C>,
}

impl<K, T, F, C> TaskLifecycleService<K, T, F, C>
where
    K: TaskRepository,
    T: TaskTemplateRepository,
    F: FacilityRepository,
    C: Clock + Send + Sync,
{
    /// Creates a lifecycle service.
    #[must_use]
    pub const fn new(tasks: Arc<K>, templates: Arc<T>, facility: Arc<F>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            templates,
            facility,
            clock,
        }
    }

    /// Creates one pending task per cage, all sharing the same template,
    /// warehouse, assignee and scheduled time.
    ///
    /// Either every task is stored or none is.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] for a malformed scheduled
    /// time, an empty or repeated cage list, or a cage from another
    /// warehouse; a not-found error when the template, warehouse, assignee
    /// or any cage does not exist.
    pub async fn create_tasks_for_cages(
        &self,
        request: CreateTasksForCagesRequest,
    ) -> TaskLifecycleResult<Vec<Task>> {
        let CreateTasksForCagesRequest {
            template_id,
            warehouse_id,
            assignee_id,
            scheduled_time,
            cage_ids,
        } = request;
        let scheduled = parse_scheduled_time(&scheduled_time)?;
        if cage_ids.is_empty() {
            return Err(TaskDomainError::EmptyCageSelection.into());
        }
        self.require_references(template_id, warehouse_id, assignee_id)
            .await?;
        self.require_cages(warehouse_id, &cage_ids).await?;

        let created: Vec<Task> = cage_ids
            .iter()
            .map(|cage_id| {
                Task::new(
                    NewTask {
                        template_id,
                        warehouse_id,
                        assignee_id,
                        scheduled_time: scheduled,
                        cage_ids: vec![*cage_id],
                    },
                    &*self.clock,
                )
            })
            .collect();
        self.tasks.store_all(&created).await?;
        tracing::info!(
            template_id = %template_id,
            warehouse_id = %warehouse_id,
            assignee_id = %assignee_id,
            task_count = created.len(),
            "tasks created for cages"
        );
        Ok(created)
    }

    /// Creates a single pending task linked to zero or one cage.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Self::create_tasks_for_cages`], except
    /// that no cage is required.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let CreateTaskRequest {
            template_id,
            warehouse_id,
            assignee_id,
            scheduled_time,
            cage_id,
        } = request;
        let scheduled = parse_scheduled_time(&scheduled_time)?;
        self.require_references(template_id, warehouse_id, assignee_id)
            .await?;
        let cage_ids: Vec<CageId> = cage_id.into_iter().collect();
        self.require_cages(warehouse_id, &cage_ids).await?;

        let task = Task::new(
            NewTask {
                template_id,
                warehouse_id,
                assignee_id,
                scheduled_time: scheduled,
                cage_ids,
            },
            &*self.clock,
        );
        self.tasks.store_all(std::slice::from_ref(&task)).await?;
        tracing::info!(task_id = %task.id(), template_id = %template_id, "task created");
        Ok(task)
    }

    /// Returns a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] (wrapped) when the task
    /// does not exist.
    pub async fn get_task(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or_else(|| TaskRepositoryError::NotFound(id).into())
    }

    /// Returns a task together with its template's descriptive fields.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the task or its template does not
    /// exist.
    pub async fn get_task_detail(&self, id: TaskId) -> TaskLifecycleResult<TaskDetail> {
        let task = self.get_task(id).await?;
        let template = self.require_template(task.template_id()).await?;
        Ok(TaskDetail::new(task, &template))
    }

    /// Moves a pending task to `IN_PROGRESS`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] (wrapped) unless
    /// the task is pending, a not-found error when it does not exist, and
    /// [`TaskRepositoryError::RevisionConflict`] (wrapped) when another
    /// writer changed it concurrently.
    pub async fn start_task(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        let mut task = self.get_task(id).await?;
        let expected = task.revision();
        if let Err(err) = task.start(&*self.clock) {
            tracing::warn!(task_id = %id, error = %err, "task start rejected");
            return Err(err.into());
        }
        self.persist_transition(&task, expected).await?;
        tracing::info!(task_id = %id, status = %task.status(), "task started");
        Ok(task)
    }

    /// Moves an in-progress task to `COMPLETED`, recording the actual
    /// working time in minutes.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] (wrapped) unless
    /// the task is in progress, a not-found error when it does not exist,
    /// and [`TaskRepositoryError::RevisionConflict`] (wrapped) when another
    /// writer changed it concurrently.
    pub async fn complete_task(
        &self,
        id: TaskId,
        actual_duration: u32,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.get_task(id).await?;
        let expected = task.revision();
        if let Err(err) = task.complete(actual_duration, &*self.clock) {
            tracing::warn!(task_id = %id, error = %err, "task completion rejected");
            return Err(err.into());
        }
        self.persist_transition(&task, expected).await?;
        tracing::info!(
            task_id = %id,
            status = %task.status(),
            actual_duration,
            "task completed"
        );
        Ok(task)
    }

    /// Deletes a task and its cage links.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] (wrapped) when the task
    /// does not exist.
    pub async fn delete_task(&self, id: TaskId) -> TaskLifecycleResult<()> {
        self.tasks.delete(id).await?;
        tracing::info!(task_id = %id, "task deleted");
        Ok(())
    }

    /// Returns tasks matching every present criterion, ordered by scheduled
    /// time ascending.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] for an unknown status, a
    /// malformed date or an inverted date range.
    pub async fn get_task_list(&self, query: TaskListQuery) -> TaskLifecycleResult<Vec<Task>> {
        let filter = query.into_filter()?;
        tracing::debug!(?filter, "listing tasks");
        Ok(self.tasks.list(&filter).await?)
    }

    /// Returns the tasks assigned to a worker, optionally in one status,
    /// ordered by scheduled time ascending.
    ///
    /// An unknown worker simply has no tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn get_worker_tasks(
        &self,
        worker_id: EmployeeId,
        status: Option<TaskStatus>,
    ) -> TaskLifecycleResult<Vec<Task>> {
        let filter = TaskFilter {
            status,
            ..TaskFilter::for_assignee(worker_id)
        };
        tracing::debug!(worker_id = %worker_id, ?status, "listing worker tasks");
        Ok(self.tasks.list(&filter).await?)
    }

    async fn persist_transition(&self, task: &Task, expected: u32) -> TaskLifecycleResult<()> {
        self.tasks.update(task, expected).await.map_err(|err| {
            if matches!(err, TaskRepositoryError::RevisionConflict { .. }) {
                tracing::warn!(task_id = %task.id(), expected, "concurrent task update lost");
            }
            err.into()
        })
    }

    async fn require_template(
        &self,
        template_id: TaskTemplateId,
    ) -> TaskLifecycleResult<TaskTemplate> {
        self.templates
            .find_by_id(template_id)
            .await?
            .ok_or_else(|| TaskTemplateRepositoryError::NotFound(template_id).into())
    }

    async fn require_references(
        &self,
        template_id: TaskTemplateId,
        warehouse_id: WarehouseId,
        assignee_id: EmployeeId,
    ) -> TaskLifecycleResult<()> {
        self.require_template(template_id).await?;
        if self.facility.find_warehouse(warehouse_id).await?.is_none() {
            return Err(FacilityRepositoryError::WarehouseNotFound(warehouse_id).into());
        }
        if self.facility.find_employee(assignee_id).await?.is_none() {
            return Err(FacilityRepositoryError::EmployeeNotFound(assignee_id).into());
        }
        Ok(())
    }

    /// Checks that `cage_ids` are distinct, exist and sit in the warehouse.
    async fn require_cages(
        &self,
        warehouse_id: WarehouseId,
        cage_ids: &[CageId],
    ) -> TaskLifecycleResult<()> {
        let mut seen = HashSet::with_capacity(cage_ids.len());
        if let Some(repeated) = cage_ids.iter().find(|cage_id| !seen.insert(**cage_id)) {
            return Err(TaskDomainError::DuplicateCage(*repeated).into());
        }
        if cage_ids.is_empty() {
            return Ok(());
        }

        let found = self.facility.find_cages(cage_ids).await?;
        for cage_id in cage_ids {
            let cage = found
                .iter()
                .find(|cage| cage.id() == *cage_id)
                .ok_or(FacilityRepositoryError::CageNotFound(*cage_id))?;
            if cage.warehouse_id() != warehouse_id {
                return Err(TaskDomainError::CageOutsideWarehouse(*cage_id).into());
            }
        }
        Ok(())
    }
}

fn parse_scheduled_time(value: &str) -> Result<DateTime<Utc>, TaskDomainError> {
    timestamp::parse(value).map_err(|_| invalid_timestamp("scheduled_time", value))
}

fn invalid_timestamp(field: &'static str, value: &str) -> TaskDomainError {
    TaskDomainError::InvalidTimestamp {
        field,
        value: value.to_owned(),
    }
}
