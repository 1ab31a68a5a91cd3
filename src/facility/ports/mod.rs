//! Port contracts for facility persistence.

pub mod repository;

pub use repository::{FacilityRepository, FacilityRepositoryError, FacilityRepositoryResult};
