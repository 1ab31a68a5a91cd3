//! Service layer for merchant CRUD, listing and keyword search.

use crate::batch::ports::{BatchRepository, BatchRepositoryError};
use crate::error::{Classify, ErrorKind};
use crate::merchant::{
    domain::{
        Merchant, MerchantDomainError, MerchantId, MerchantProfile, MerchantUpdate, SearchKeyword,
        SearchMode,
    },
    ports::{MerchantRepository, MerchantRepositoryError},
};
use crate::pagination::{Page, PageRequest};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a merchant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMerchantRequest {
    name: String,
    contact_person: String,
    phone: String,
    address: String,
}

impl CreateMerchantRequest {
    /// Creates a request with the mandatory contact fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        contact_person: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            contact_person: contact_person.into(),
            phone: phone.into(),
            address: String::new(),
        }
    }

    /// Sets the postal address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }
}

/// Request payload for a partial merchant update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateMerchantRequest {
    update: MerchantUpdate,
}

impl UpdateMerchantRequest {
    /// Creates an update that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.update.name = Some(name.into());
        self
    }

    /// Replaces the contact person.
    #[must_use]
    pub fn with_contact_person(mut self, contact_person: impl Into<String>) -> Self {
        self.update.contact_person = Some(contact_person.into());
        self
    }

    /// Replaces the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.update.phone = Some(phone.into());
        self
    }

    /// Replaces the address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.update.address = Some(address.into());
        self
    }
}

/// Service-level errors for merchant operations.
#[derive(Debug, Error)]
pub enum MerchantServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] MerchantDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] MerchantRepositoryError),
    /// Batch reference lookup failed.
    #[error(transparent)]
    Batch(#[from] BatchRepositoryError),
}

impl Classify for MerchantServiceError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::Repository(err) => err.kind(),
            Self::Batch(err) => err.kind(),
        }
    }
}

/// Result type for merchant service operations.
pub type MerchantServiceResult<T> = Result<T, MerchantServiceError>;

/// Merchant orchestration service.
#[derive(Clone)]
pub struct MerchantService<R, B, C>
where
    R: MerchantRepository,
    B: BatchRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    batches: Arc<B>,
    clock: Arc<C>,
    search_mode: SearchMode,
}

impl<R, B, C> MerchantService<R, B, C>
where
    R: MerchantRepository,
    B: BatchRepository,
    C: Clock + Send + Sync,
{
    /// Creates a merchant service with case-sensitive search.
    ///
    /// `batches` is consulted before deletion so that a merchant owning
    /// batches is never removed.
    #[must_use]
    pub const fn new(repository: Arc<R>, batches: Arc<B>, clock: Arc<C>) -> Self {
        Self {
            repository,
            batches,
            clock,
            search_mode: SearchMode::CaseSensitive,
        }
    }

    /// Overrides the keyword search mode.
    #[must_use]
    pub const fn with_search_mode(mut self, search_mode: SearchMode) -> Self {
        self.search_mode = search_mode;
        self
    }

    /// Creates and stores a merchant.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantServiceError::Domain`] when a mandatory field is
    /// blank, or [`MerchantServiceError::Repository`] when persistence fails.
    pub async fn create_merchant(
        &self,
        request: CreateMerchantRequest,
    ) -> MerchantServiceResult<Merchant> {
        let CreateMerchantRequest {
            name,
            contact_person,
            phone,
            address,
        } = request;
        let profile = MerchantProfile::new(name, contact_person, phone, address)?;
        let merchant = Merchant::new(profile, &*self.clock);
        self.repository.store(&merchant).await?;
        tracing::info!(merchant_id = %merchant.id(), "merchant created");
        Ok(merchant)
    }

    /// Returns a merchant by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantRepositoryError::NotFound`] (wrapped) when the
    /// merchant does not exist.
    pub async fn get_merchant(&self, id: MerchantId) -> MerchantServiceResult<Merchant> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| MerchantRepositoryError::NotFound(id).into())
    }

    /// Applies a partial update to a merchant.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantServiceError`] when the merchant is missing, a
    /// replacement value is blank, or persistence fails.
    pub async fn update_merchant(
        &self,
        id: MerchantId,
        request: UpdateMerchantRequest,
    ) -> MerchantServiceResult<Merchant> {
        let mut merchant = self.get_merchant(id).await?;
        merchant.apply(request.update, &*self.clock)?;
        self.repository.update(&merchant).await?;
        tracing::info!(merchant_id = %id, "merchant updated");
        Ok(merchant)
    }

    /// Deletes a merchant that owns no batches.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantRepositoryError::StillReferenced`] (wrapped) while
    /// batches belong to the merchant, or a not-found error when it does not
    /// exist.
    pub async fn delete_merchant(&self, id: MerchantId) -> MerchantServiceResult<()> {
        self.get_merchant(id).await?;
        if self.batches.references_merchant(id).await? {
            tracing::warn!(merchant_id = %id, "refusing to delete merchant with batches");
            return Err(MerchantRepositoryError::StillReferenced(id).into());
        }
        self.repository.delete(id).await?;
        tracing::info!(merchant_id = %id, "merchant deleted");
        Ok(())
    }

    /// Returns one page of merchants, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_merchants(&self, page: PageRequest) -> MerchantServiceResult<Page<Merchant>> {
        tracing::debug!(page = page.page(), per_page = page.per_page(), "listing merchants");
        Ok(self.repository.list(page).await?)
    }

    /// Returns merchants whose name, contact person or phone contains the
    /// keyword.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantDomainError::EmptySearchKeyword`] (wrapped) for a
    /// blank keyword, or [`MerchantServiceError::Repository`] when
    /// persistence lookup fails.
    pub async fn search_merchants(&self, keyword: &str) -> MerchantServiceResult<Vec<Merchant>> {
        let search_keyword = SearchKeyword::new(keyword)?;
        tracing::debug!(keyword = %search_keyword, mode = ?self.search_mode, "searching merchants");
        Ok(self
            .repository
            .search(&search_keyword, self.search_mode)
            .await?)
    }
}
