//! In-memory adapters for task and template persistence.

mod task;
mod template;

pub use task::InMemoryTaskRepository;
pub use template::InMemoryTaskTemplateRepository;
