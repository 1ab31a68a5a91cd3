//! Application services for collar batches.

mod batches;

pub use batches::{BatchService, BatchServiceError, BatchServiceResult};
