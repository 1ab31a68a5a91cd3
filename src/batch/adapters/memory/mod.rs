//! In-memory adapter for batch persistence.

mod batch;

pub use batch::InMemoryBatchRepository;
