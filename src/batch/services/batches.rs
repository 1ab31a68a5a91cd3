//! Service layer for issuing batches and tracing collars.
//!
//! [`BatchService`] checks that the owning merchant exists before generating
//! collar codes, and resolves collar codes back to merchants.

use crate::batch::{
    domain::{Batch, BatchDomainError, BatchId, BatchIssue, Collar, CollarCode, CollarCount},
    ports::{BatchRepository, BatchRepositoryError},
};
use crate::config::BatchSettings;
use crate::error::{Classify, ErrorKind};
use crate::merchant::{
    domain::{Merchant, MerchantId},
    ports::{MerchantRepository, MerchantRepositoryError},
};
use crate::pagination::{Page, PageRequest};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for batch operations.
#[derive(Debug, Error)]
pub enum BatchServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BatchDomainError),
    /// Batch repository operation failed.
    #[error(transparent)]
    Repository(#[from] BatchRepositoryError),
    /// Merchant lookup failed.
    #[error(transparent)]
    Merchant(#[from] MerchantRepositoryError),
}

impl Classify for BatchServiceError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::Repository(err) => err.kind(),
            Self::Merchant(err) => err.kind(),
        }
    }
}

/// Result type for batch service operations.
pub type BatchServiceResult<T> = Result<T, BatchServiceError>;

/// Batch issuing and collar tracing service.
#[derive(Clone)]
pub struct BatchService<B, M, C>
where
    B: BatchRepository,
    M: MerchantRepository,
    C: Clock + Send + Sync,
{
    batches: Arc<B>,
    merchants: Arc<M>,
    clock: Arc<C>,
    settings: BatchSettings,
}

impl<B, M, C> BatchService<B, M, C>
where
    B: BatchRepository,
    M: MerchantRepository,
    C: Clock + Send + Sync,
{
    /// Creates a batch service with default limits.
    #[must_use]
    pub fn new(batches: Arc<B>, merchants: Arc<M>, clock: Arc<C>) -> Self {
        Self {
            batches,
            merchants,
            clock,
            settings: BatchSettings::default(),
        }
    }

    /// Overrides the batch limits.
    #[must_use]
    pub const fn with_settings(mut self, settings: BatchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Issues a batch of `collar_count` collars to a merchant.
    ///
    /// The batch and every collar are written in one unit of work.
    ///
    /// # Errors
    ///
    /// Returns [`BatchServiceError::Domain`] for a zero or oversized count,
    /// [`BatchServiceError::Merchant`] when the merchant does not exist, or
    /// [`BatchServiceError::Repository`] when persistence fails.
    pub async fn create_batch(
        &self,
        merchant_id: MerchantId,
        collar_count: u32,
    ) -> BatchServiceResult<BatchIssue> {
        let count = CollarCount::new(collar_count, self.settings.max_collars_per_batch)?;
        self.require_merchant(merchant_id).await?;

        let issue = BatchIssue::generate(merchant_id, count, &*self.clock);
        self.batches.store_issue(&issue).await?;
        tracing::info!(
            batch_id = %issue.batch().id(),
            merchant_id = %merchant_id,
            collar_count,
            "batch issued"
        );
        Ok(issue)
    }

    /// Returns one page of all batches, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`BatchServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_batches(&self, page: PageRequest) -> BatchServiceResult<Page<Batch>> {
        Ok(self.batches.list(page).await?)
    }

    /// Returns one page of a merchant's batches, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`BatchServiceError::Merchant`] when the merchant does not
    /// exist, or [`BatchServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_merchant_batches(
        &self,
        merchant_id: MerchantId,
        page: PageRequest,
    ) -> BatchServiceResult<Page<Batch>> {
        self.require_merchant(merchant_id).await?;
        Ok(self.batches.list_by_merchant(merchant_id, page).await?)
    }

    /// Returns one page of the collars issued in a batch.
    ///
    /// # Errors
    ///
    /// Returns [`BatchRepositoryError::NotFound`] (wrapped) when the batch
    /// does not exist.
    pub async fn list_batch_collars(
        &self,
        batch_id: BatchId,
        page: PageRequest,
    ) -> BatchServiceResult<Page<Collar>> {
        if self.batches.find_by_id(batch_id).await?.is_none() {
            return Err(BatchRepositoryError::NotFound(batch_id).into());
        }
        Ok(self.batches.list_collars(batch_id, page).await?)
    }

    /// Resolves a collar code to the merchant it was issued to.
    ///
    /// # Errors
    ///
    /// Returns [`BatchServiceError::Domain`] for a malformed code and a
    /// not-found error when no collar or merchant matches.
    pub async fn find_merchant_by_collar_code(&self, code: &str) -> BatchServiceResult<Merchant> {
        let collar_code = CollarCode::parse(code)?;
        let collar = self
            .batches
            .find_collar_by_code(&collar_code)
            .await?
            .ok_or(BatchRepositoryError::CollarNotFound(collar_code))?;
        self.require_merchant(collar.merchant_id()).await
    }

    async fn require_merchant(&self, merchant_id: MerchantId) -> BatchServiceResult<Merchant> {
        self.merchants
            .find_by_id(merchant_id)
            .await?
            .ok_or_else(|| MerchantRepositoryError::NotFound(merchant_id).into())
    }
}
