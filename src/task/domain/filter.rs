//! Conjunctive task filter.

use super::{Task, TaskDomainError, TaskStatus, TaskTemplateId};
use crate::facility::domain::{EmployeeId, WarehouseId};
use chrono::{DateTime, Utc};

/// Task list filter. Every present criterion must match.
///
/// Schedule bounds are inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Required status.
    pub status: Option<TaskStatus>,
    /// Required assignee.
    pub assignee_id: Option<EmployeeId>,
    /// Required warehouse.
    pub warehouse_id: Option<WarehouseId>,
    /// Required template.
    pub template_id: Option<TaskTemplateId>,
    /// Earliest scheduled time.
    pub scheduled_from: Option<DateTime<Utc>>,
    /// Latest scheduled time.
    pub scheduled_to: Option<DateTime<Utc>>,
}

impl TaskFilter {
    /// Matches tasks assigned to one employee.
    #[must_use]
    pub fn for_assignee(assignee_id: EmployeeId) -> Self {
        Self {
            assignee_id: Some(assignee_id),
            ..Self::default()
        }
    }

    /// Rejects a schedule window whose end precedes its start.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvertedDateRange`] for an inverted
    /// window.
    pub fn validate(&self) -> Result<(), TaskDomainError> {
        match (self.scheduled_from, self.scheduled_to) {
            (Some(start), Some(end)) if start > end => {
                Err(TaskDomainError::InvertedDateRange { start, end })
            }
            _ => Ok(()),
        }
    }

    /// Returns `true` when the task satisfies every present criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|status| task.status() == status)
            && self.assignee_id.is_none_or(|id| task.assignee_id() == id)
            && self.warehouse_id.is_none_or(|id| task.warehouse_id() == id)
            && self.template_id.is_none_or(|id| task.template_id() == id)
            && self
                .scheduled_from
                .is_none_or(|start| task.scheduled_time() >= start)
            && self
                .scheduled_to
                .is_none_or(|end| task.scheduled_time() <= end)
    }
}
