//! In-memory adapter for facility persistence.

mod facility;

pub use facility::InMemoryFacilityRepository;
