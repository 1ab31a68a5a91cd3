//! `PostgreSQL` adapter for batch and collar persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresBatchRepository;
