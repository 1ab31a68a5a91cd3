//! In-memory merchant repository for tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::merchant::{
    domain::{Merchant, MerchantId, SearchKeyword, SearchMode},
    ports::{MerchantRepository, MerchantRepositoryError, MerchantRepositoryResult},
};
use crate::pagination::{Page, PageRequest};
use crate::persistence::lock_poisoned;

/// Thread-safe in-memory merchant repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMerchantRepository {
    state: Arc<RwLock<InMemoryMerchantState>>,
}

#[derive(Debug, Default)]
struct InMemoryMerchantState {
    merchants: HashMap<MerchantId, Merchant>,
    insertion_order: Vec<MerchantId>,
}

impl InMemoryMerchantState {
    /// Merchants ordered newest first.
    fn newest_first(&self) -> impl Iterator<Item = &Merchant> {
        self.insertion_order
            .iter()
            .rev()
            .filter_map(|id| self.merchants.get(id))
    }
}

impl InMemoryMerchantRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> MerchantRepositoryResult<RwLockReadGuard<'_, InMemoryMerchantState>> {
        self.state
            .read()
            .map_err(|err| lock_poisoned::<MerchantRepositoryError>(&err))
    }

    fn write(&self) -> MerchantRepositoryResult<RwLockWriteGuard<'_, InMemoryMerchantState>> {
        self.state
            .write()
            .map_err(|err| lock_poisoned::<MerchantRepositoryError>(&err))
    }
}

#[async_trait]
impl MerchantRepository for InMemoryMerchantRepository {
    async fn store(&self, merchant: &Merchant) -> MerchantRepositoryResult<()> {
        let mut state = self.write()?;
        if state.merchants.contains_key(&merchant.id()) {
            return Err(MerchantRepositoryError::DuplicateMerchant(merchant.id()));
        }
        state.insertion_order.push(merchant.id());
        state.merchants.insert(merchant.id(), merchant.clone());
        Ok(())
    }

    async fn update(&self, merchant: &Merchant) -> MerchantRepositoryResult<()> {
        let mut state = self.write()?;
        let slot = state
            .merchants
            .get_mut(&merchant.id())
            .ok_or(MerchantRepositoryError::NotFound(merchant.id()))?;
        *slot = merchant.clone();
        Ok(())
    }

    async fn delete(&self, id: MerchantId) -> MerchantRepositoryResult<()> {
        let mut state = self.write()?;
        if state.merchants.remove(&id).is_none() {
            return Err(MerchantRepositoryError::NotFound(id));
        }
        state.insertion_order.retain(|existing| *existing != id);
        Ok(())
    }

    async fn find_by_id(&self, id: MerchantId) -> MerchantRepositoryResult<Option<Merchant>> {
        let state = self.read()?;
        Ok(state.merchants.get(&id).cloned())
    }

    async fn list(&self, page: PageRequest) -> MerchantRepositoryResult<Page<Merchant>> {
        let state = self.read()?;
        let ordered: Vec<Merchant> = state.newest_first().cloned().collect();
        Ok(Page::new(page.slice(&ordered), ordered.len() as u64))
    }

    async fn search(
        &self,
        keyword: &SearchKeyword,
        mode: SearchMode,
    ) -> MerchantRepositoryResult<Vec<Merchant>> {
        let state = self.read()?;
        Ok(state
            .newest_first()
            .filter(|merchant| merchant.matches(keyword, mode))
            .cloned()
            .collect())
    }
}
