//! Repository port for batches and their collars.

use crate::batch::domain::{Batch, BatchId, BatchIssue, Collar, CollarCode};
use crate::error::{Classify, ErrorKind};
use crate::merchant::domain::MerchantId;
use crate::pagination::{Page, PageRequest};
use crate::persistence::PersistenceFailure;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for batch repository operations.
pub type BatchRepositoryResult<T> = Result<T, BatchRepositoryError>;

/// Batch and collar persistence contract.
#[async_trait]
pub trait BatchRepository: Send + Sync {
    /// Stores a batch and all of its collars atomically.
    ///
    /// Either every row is written or none is.
    ///
    /// # Errors
    ///
    /// Returns [`BatchRepositoryError::DuplicateBatch`] or
    /// [`BatchRepositoryError::CollarCodeCollision`] on uniqueness
    /// violations, and [`BatchRepositoryError::MerchantMissing`] when the
    /// owning merchant row is gone.
    async fn store_issue(&self, issue: &BatchIssue) -> BatchRepositoryResult<()>;

    /// Finds a batch by identifier.
    async fn find_by_id(&self, id: BatchId) -> BatchRepositoryResult<Option<Batch>>;

    /// Returns one page of all batches, newest first.
    async fn list(&self, page: PageRequest) -> BatchRepositoryResult<Page<Batch>>;

    /// Returns one page of a merchant's batches, newest first.
    async fn list_by_merchant(
        &self,
        merchant_id: MerchantId,
        page: PageRequest,
    ) -> BatchRepositoryResult<Page<Batch>>;

    /// Returns one page of a batch's collars.
    async fn list_collars(
        &self,
        batch_id: BatchId,
        page: PageRequest,
    ) -> BatchRepositoryResult<Page<Collar>>;

    /// Finds a collar by its code.
    async fn find_collar_by_code(&self, code: &CollarCode)
    -> BatchRepositoryResult<Option<Collar>>;

    /// Returns `true` when any batch belongs to the merchant.
    async fn references_merchant(&self, merchant_id: MerchantId) -> BatchRepositoryResult<bool>;
}

/// Errors returned by batch repository implementations.
#[derive(Debug, Clone, Error)]
pub enum BatchRepositoryError {
    /// A batch with the same identifier already exists.
    #[error("duplicate batch identifier: {0}")]
    DuplicateBatch(BatchId),

    /// A collar code in the batch is already in use.
    #[error("a collar code in batch {0} is already in use")]
    CollarCodeCollision(BatchId),

    /// The batch was not found.
    #[error("batch not found: {0}")]
    NotFound(BatchId),

    /// No collar carries the code.
    #[error("collar not found: {0}")]
    CollarNotFound(CollarCode),

    /// The owning merchant disappeared before the batch was written.
    #[error("merchant not found: {0}")]
    MerchantMissing(MerchantId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PersistenceFailure for BatchRepositoryError {
    fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl Classify for BatchRepositoryError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateBatch(_) | Self::CollarCodeCollision(_) => ErrorKind::Conflict,
            Self::NotFound(_) | Self::CollarNotFound(_) | Self::MerchantMissing(_) => {
                ErrorKind::NotFound
            }
            Self::Persistence(_) => ErrorKind::Persistence,
        }
    }
}
