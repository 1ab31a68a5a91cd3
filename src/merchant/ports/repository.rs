//! Repository port for merchant persistence, listing and search.

use crate::error::{Classify, ErrorKind};
use crate::merchant::domain::{Merchant, MerchantId, SearchKeyword, SearchMode};
use crate::pagination::{Page, PageRequest};
use crate::persistence::PersistenceFailure;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for merchant repository operations.
pub type MerchantRepositoryResult<T> = Result<T, MerchantRepositoryError>;

/// Merchant persistence contract.
#[async_trait]
pub trait MerchantRepository: Send + Sync {
    /// Stores a new merchant.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantRepositoryError::DuplicateMerchant`] when the ID
    /// already exists.
    async fn store(&self, merchant: &Merchant) -> MerchantRepositoryResult<()>;

    /// Persists changed contact details and timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantRepositoryError::NotFound`] when the merchant does
    /// not exist.
    async fn update(&self, merchant: &Merchant) -> MerchantRepositoryResult<()>;

    /// Deletes a merchant.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantRepositoryError::NotFound`] when the merchant does
    /// not exist or [`MerchantRepositoryError::StillReferenced`] when
    /// batches still point at it.
    async fn delete(&self, id: MerchantId) -> MerchantRepositoryResult<()>;

    /// Finds a merchant by identifier.
    ///
    /// Returns `None` when the merchant does not exist.
    async fn find_by_id(&self, id: MerchantId) -> MerchantRepositoryResult<Option<Merchant>>;

    /// Returns one page of merchants, newest first.
    async fn list(&self, page: PageRequest) -> MerchantRepositoryResult<Page<Merchant>>;

    /// Returns every merchant whose name, contact person or phone contains
    /// the keyword, newest first.
    async fn search(
        &self,
        keyword: &SearchKeyword,
        mode: SearchMode,
    ) -> MerchantRepositoryResult<Vec<Merchant>>;
}

/// Errors returned by merchant repository implementations.
#[derive(Debug, Clone, Error)]
pub enum MerchantRepositoryError {
    /// A merchant with the same identifier already exists.
    #[error("duplicate merchant identifier: {0}")]
    DuplicateMerchant(MerchantId),

    /// The merchant was not found.
    #[error("merchant not found: {0}")]
    NotFound(MerchantId),

    /// Batches still reference the merchant.
    #[error("merchant {0} still owns batches and cannot be deleted")]
    StillReferenced(MerchantId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PersistenceFailure for MerchantRepositoryError {
    fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl Classify for MerchantRepositoryError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateMerchant(_) | Self::StillReferenced(_) => ErrorKind::Conflict,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Persistence(_) => ErrorKind::Persistence,
        }
    }
}
