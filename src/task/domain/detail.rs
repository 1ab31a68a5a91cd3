//! Task view enriched with template fields.

use super::{RecurrenceType, Task, TaskTemplate};
use serde::{Deserialize, Serialize};

/// A task together with the name, description and recurrence of its
/// template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetail {
    #[serde(flatten)]
    task: Task,
    name: String,
    description: String,
    recurrence_type: RecurrenceType,
    is_recurring: bool,
}

impl TaskDetail {
    /// Joins a task with its template.
    #[must_use]
    pub fn new(task: Task, template: &TaskTemplate) -> Self {
        Self {
            task,
            name: template.name().to_owned(),
            description: template.description().to_owned(),
            recurrence_type: template.recurrence_type(),
            is_recurring: template.is_recurring(),
        }
    }

    /// Returns the task.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the template name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the template description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the template's recurrence classification.
    #[must_use]
    pub const fn recurrence_type(&self) -> RecurrenceType {
        self.recurrence_type
    }

    /// Returns `true` when the template recurs.
    #[must_use]
    pub const fn is_recurring(&self) -> bool {
        self.is_recurring
    }
}
