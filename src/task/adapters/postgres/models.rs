//! Diesel row models for task persistence.

use super::schema::{task_cages, task_templates, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Template row, used for reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_templates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskTemplateRow {
    /// Primary key.
    pub id: uuid::Uuid,
    /// Template name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Lowercase recurrence label.
    pub recurrence_type: String,
    /// Estimated duration in minutes.
    pub estimated_duration: Option<i32>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied by template updates.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = task_templates)]
#[diesel(treat_none_as_null = true)]
pub struct TaskTemplateChangeset {
    /// Replacement template name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Lowercase recurrence label.
    pub recurrence_type: String,
    /// Estimated duration in minutes.
    pub estimated_duration: Option<i32>,
    /// Refreshed update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Task row, used for reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Primary key.
    pub id: uuid::Uuid,
    /// Template the task was created from.
    pub template_id: uuid::Uuid,
    /// Owning warehouse.
    pub warehouse_id: uuid::Uuid,
    /// Assigned employee.
    pub assignee_id: uuid::Uuid,
    /// Upper-case lifecycle status.
    pub status: String,
    /// Scheduled start time.
    pub scheduled_time: DateTime<Utc>,
    /// Completion time, set once completed.
    pub completed_time: Option<DateTime<Utc>>,
    /// Recorded duration in minutes.
    pub actual_duration: Option<i32>,
    /// Optimistic concurrency counter.
    pub revision: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied by lifecycle transitions.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskLifecycleChangeset {
    /// New lifecycle status.
    pub status: String,
    /// Completion time, set once completed.
    pub completed_time: Option<DateTime<Utc>>,
    /// Recorded duration in minutes.
    pub actual_duration: Option<i32>,
    /// Revision after the transition.
    pub revision: i32,
    /// Refreshed update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Task-to-cage link row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_cages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskCageRow {
    /// Linked task.
    pub task_id: uuid::Uuid,
    /// Linked cage.
    pub cage_id: uuid::Uuid,
    /// Link creation timestamp.
    pub created_at: DateTime<Utc>,
}
