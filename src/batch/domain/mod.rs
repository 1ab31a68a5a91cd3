//! Domain model for collar batches.

mod batch;
mod collar;
mod error;
mod ids;

pub use batch::{Batch, BatchIssue, CollarCount, PersistedBatchData};
pub use collar::{Collar, CollarCode, PersistedCollarData};
pub use error::BatchDomainError;
pub use ids::{BatchId, CollarId};
