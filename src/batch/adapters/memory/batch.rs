//! In-memory batch repository for tests and embedding.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::batch::{
    domain::{Batch, BatchId, BatchIssue, Collar, CollarCode, CollarId},
    ports::{BatchRepository, BatchRepositoryError, BatchRepositoryResult},
};
use crate::merchant::domain::MerchantId;
use crate::pagination::{Page, PageRequest};
use crate::persistence::lock_poisoned;

/// Thread-safe in-memory batch repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBatchRepository {
    state: Arc<RwLock<InMemoryBatchState>>,
}

#[derive(Debug, Default)]
struct InMemoryBatchState {
    batches: HashMap<BatchId, Batch>,
    batch_order: Vec<BatchId>,
    collars: HashMap<CollarId, Collar>,
    collar_order: Vec<CollarId>,
    code_index: HashMap<CollarCode, CollarId>,
}

impl InMemoryBatchState {
    fn batches_newest_first(&self) -> impl Iterator<Item = &Batch> {
        self.batch_order
            .iter()
            .rev()
            .filter_map(|id| self.batches.get(id))
    }

    fn check_issue(&self, issue: &BatchIssue) -> BatchRepositoryResult<()> {
        let batch_id = issue.batch().id();
        if self.batches.contains_key(&batch_id) {
            return Err(BatchRepositoryError::DuplicateBatch(batch_id));
        }
        let mut pending = HashSet::new();
        for collar in issue.collars() {
            let code = collar.collar_code();
            if self.code_index.contains_key(code) || !pending.insert(code) {
                return Err(BatchRepositoryError::CollarCodeCollision(batch_id));
            }
        }
        Ok(())
    }
}

impl InMemoryBatchRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> BatchRepositoryResult<RwLockReadGuard<'_, InMemoryBatchState>> {
        self.state
            .read()
            .map_err(|err| lock_poisoned::<BatchRepositoryError>(&err))
    }

    fn write(&self) -> BatchRepositoryResult<RwLockWriteGuard<'_, InMemoryBatchState>> {
        self.state
            .write()
            .map_err(|err| lock_poisoned::<BatchRepositoryError>(&err))
    }
}

#[async_trait]
impl BatchRepository for InMemoryBatchRepository {
    async fn store_issue(&self, issue: &BatchIssue) -> BatchRepositoryResult<()> {
        let mut state = self.write()?;
        state.check_issue(issue)?;

        let batch = issue.batch();
        state.batch_order.push(batch.id());
        state.batches.insert(batch.id(), batch.clone());
        for collar in issue.collars() {
            state
                .code_index
                .insert(collar.collar_code().clone(), collar.id());
            state.collar_order.push(collar.id());
            state.collars.insert(collar.id(), collar.clone());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: BatchId) -> BatchRepositoryResult<Option<Batch>> {
        let state = self.read()?;
        Ok(state.batches.get(&id).cloned())
    }

    async fn list(&self, page: PageRequest) -> BatchRepositoryResult<Page<Batch>> {
        let state = self.read()?;
        let ordered: Vec<Batch> = state.batches_newest_first().cloned().collect();
        Ok(Page::new(page.slice(&ordered), ordered.len() as u64))
    }

    async fn list_by_merchant(
        &self,
        merchant_id: MerchantId,
        page: PageRequest,
    ) -> BatchRepositoryResult<Page<Batch>> {
        let state = self.read()?;
        let ordered: Vec<Batch> = state
            .batches_newest_first()
            .filter(|batch| batch.merchant_id() == merchant_id)
            .cloned()
            .collect();
        Ok(Page::new(page.slice(&ordered), ordered.len() as u64))
    }

    async fn list_collars(
        &self,
        batch_id: BatchId,
        page: PageRequest,
    ) -> BatchRepositoryResult<Page<Collar>> {
        let state = self.read()?;
        let ordered: Vec<Collar> = state
            .collar_order
            .iter()
            .filter_map(|id| state.collars.get(id))
            .filter(|collar| collar.batch_id() == batch_id)
            .cloned()
            .collect();
        Ok(Page::new(page.slice(&ordered), ordered.len() as u64))
    }

    async fn find_collar_by_code(
        &self,
        code: &CollarCode,
    ) -> BatchRepositoryResult<Option<Collar>> {
        let state = self.read()?;
        Ok(state
            .code_index
            .get(code)
            .and_then(|id| state.collars.get(id))
            .cloned())
    }

    async fn references_merchant(&self, merchant_id: MerchantId) -> BatchRepositoryResult<bool> {
        let state = self.read()?;
        Ok(state
            .batches
            .values()
            .any(|batch| batch.merchant_id() == merchant_id))
    }
}
