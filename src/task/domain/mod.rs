//! Domain model for task templates and the task lifecycle.

mod detail;
mod error;
mod filter;
mod ids;
mod recurrence;
mod status;
mod task;
mod template;

pub use detail::TaskDetail;
pub use error::{ParseRecurrenceTypeError, ParseTaskStatusError, TaskDomainError};
pub use filter::TaskFilter;
pub use ids::{TaskId, TaskTemplateId};
pub use recurrence::RecurrenceType;
pub use status::TaskStatus;
pub use task::{NewTask, PersistedTaskData, Task};
pub use template::{PersistedTaskTemplateData, TaskTemplate, TaskTemplateUpdate};
