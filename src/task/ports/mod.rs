//! Port contracts for task and template persistence.

pub mod repository;
pub mod template_repository;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
pub use template_repository::{
    TaskTemplateRepository, TaskTemplateRepositoryError, TaskTemplateRepositoryResult,
};
