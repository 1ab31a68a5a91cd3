//! Application services for templates and the task lifecycle.

mod lifecycle;
mod templates;

pub use lifecycle::{
    CreateTaskRequest, CreateTasksForCagesRequest, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService, TaskListQuery,
};
pub use templates::{
    CreateTaskTemplateRequest, TaskTemplateService, TaskTemplateServiceError,
    TaskTemplateServiceResult, UpdateTaskTemplateRequest,
};
