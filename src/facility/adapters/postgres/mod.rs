//! `PostgreSQL` adapter for facility persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresFacilityRepository;
