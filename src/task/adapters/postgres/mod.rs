//! `PostgreSQL` adapters for task and template persistence.

mod models;
mod repository;
mod schema;
mod template_repository;

pub use repository::PostgresTaskRepository;
pub use template_repository::PostgresTaskTemplateRepository;
