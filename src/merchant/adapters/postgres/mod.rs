//! `PostgreSQL` adapter for merchant persistence.

mod models;
mod repository;
pub(crate) mod schema;

pub use repository::PostgresMerchantRepository;
