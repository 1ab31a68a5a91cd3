//! Port contracts for batch persistence.

pub mod repository;

pub use repository::{BatchRepository, BatchRepositoryError, BatchRepositoryResult};
