//! Task aggregate root and its lifecycle.

use super::{TaskDomainError, TaskId, TaskStatus, TaskTemplateId};
use crate::facility::domain::{CageId, EmployeeId, WarehouseId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Scheduling data for a task that has not been created yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Template the task is an instance of.
    pub template_id: TaskTemplateId,
    /// Warehouse where the work happens.
    pub warehouse_id: WarehouseId,
    /// Employee responsible for the work.
    pub assignee_id: EmployeeId,
    /// Planned start.
    pub scheduled_time: DateTime<Utc>,
    /// Cages the task covers.
    pub cage_ids: Vec<CageId>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    template_id: TaskTemplateId,
    warehouse_id: WarehouseId,
    assignee_id: EmployeeId,
    status: TaskStatus,
    #[serde(with = "crate::timestamp")]
    scheduled_time: DateTime<Utc>,
    #[serde(with = "crate::timestamp::option")]
    completed_time: Option<DateTime<Utc>>,
    actual_duration: Option<u32>,
    cage_ids: Vec<CageId>,
    revision: u32,
    #[serde(with = "crate::timestamp")]
    created_at: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted template reference.
    pub template_id: TaskTemplateId,
    /// Persisted warehouse reference.
    pub warehouse_id: WarehouseId,
    /// Persisted assignee reference.
    pub assignee_id: EmployeeId,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted planned start.
    pub scheduled_time: DateTime<Utc>,
    /// Persisted completion time.
    pub completed_time: Option<DateTime<Utc>>,
    /// Persisted working time in minutes.
    pub actual_duration: Option<u32>,
    /// Persisted cage links.
    pub cage_ids: Vec<CageId>,
    /// Persisted revision counter.
    pub revision: u32,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a pending task at revision zero.
    #[must_use]
    pub fn new(new_task: NewTask, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            template_id: new_task.template_id,
            warehouse_id: new_task.warehouse_id,
            assignee_id: new_task.assignee_id,
            status: TaskStatus::Pending,
            scheduled_time: new_task.scheduled_time,
            completed_time: None,
            actual_duration: None,
            cage_ids: new_task.cage_ids,
            revision: 0,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            template_id: data.template_id,
            warehouse_id: data.warehouse_id,
            assignee_id: data.assignee_id,
            status: data.status,
            scheduled_time: data.scheduled_time,
            completed_time: data.completed_time,
            actual_duration: data.actual_duration,
            cage_ids: data.cage_ids,
            revision: data.revision,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the template reference.
    #[must_use]
    pub const fn template_id(&self) -> TaskTemplateId {
        self.template_id
    }

    /// Returns the warehouse reference.
    #[must_use]
    pub const fn warehouse_id(&self) -> WarehouseId {
        self.warehouse_id
    }

    /// Returns the assignee reference.
    #[must_use]
    pub const fn assignee_id(&self) -> EmployeeId {
        self.assignee_id
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the planned start.
    #[must_use]
    pub const fn scheduled_time(&self) -> DateTime<Utc> {
        self.scheduled_time
    }

    /// Returns the completion time once completed.
    #[must_use]
    pub const fn completed_time(&self) -> Option<DateTime<Utc>> {
        self.completed_time
    }

    /// Returns the recorded working time in minutes once completed.
    #[must_use]
    pub const fn actual_duration(&self) -> Option<u32> {
        self.actual_duration
    }

    /// Returns the linked cages.
    #[must_use]
    pub fn cage_ids(&self) -> &[CageId] {
        &self.cage_ids
    }

    /// Returns the revision counter, bumped on every change.
    #[must_use]
    pub const fn revision(&self) -> u32 {
        self.revision
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves a pending task to [`TaskStatus::InProgress`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] unless the task
    /// is pending. The task is left unchanged in that case.
    pub fn start(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.transition_to(TaskStatus::InProgress)?;
        self.touch(clock);
        Ok(())
    }

    /// Moves an in-progress task to [`TaskStatus::Completed`].
    ///
    /// Stamps the completion time from the clock, never earlier than the
    /// creation time, and records `actual_duration` as given.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] unless the task
    /// is in progress. The task is left unchanged in that case.
    pub fn complete(
        &mut self,
        actual_duration: u32,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.transition_to(TaskStatus::Completed)?;
        let now = clock.utc().max(self.created_at);
        self.completed_time = Some(now);
        self.actual_duration = Some(actual_duration);
        self.updated_at = now;
        self.revision = self.revision.wrapping_add(1);
        Ok(())
    }

    fn transition_to(&mut self, target: TaskStatus) -> Result<(), TaskDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(TaskDomainError::InvalidStateTransition {
                task_id: self.id,
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        Ok(())
    }

    /// Refreshes `updated_at` and bumps the revision.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
        self.revision = self.revision.wrapping_add(1);
    }
}
