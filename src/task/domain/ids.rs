//! Identifier types for the task domain.

use crate::ids::uuid_identifier;

uuid_identifier! {
    /// Unique identifier for a task template.
    TaskTemplateId
}

uuid_identifier! {
    /// Unique identifier for a task.
    TaskId
}
