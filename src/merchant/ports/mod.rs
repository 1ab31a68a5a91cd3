//! Port contracts for merchant persistence.

pub mod repository;

pub use repository::{MerchantRepository, MerchantRepositoryError, MerchantRepositoryResult};
