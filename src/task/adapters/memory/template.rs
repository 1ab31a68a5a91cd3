//! In-memory template repository for tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::persistence::lock_poisoned;
use crate::task::{
    domain::{TaskTemplate, TaskTemplateId},
    ports::{TaskTemplateRepository, TaskTemplateRepositoryError, TaskTemplateRepositoryResult},
};

/// Thread-safe in-memory template repository.
///
/// Reference checks on delete are left to the service, which consults the
/// task repository first.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskTemplateRepository {
    state: Arc<RwLock<InMemoryTemplateState>>,
}

#[derive(Debug, Default)]
struct InMemoryTemplateState {
    templates: HashMap<TaskTemplateId, TaskTemplate>,
    insertion_order: Vec<TaskTemplateId>,
}

impl InMemoryTaskTemplateRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskTemplateRepositoryResult<RwLockReadGuard<'_, InMemoryTemplateState>> {
        self.state
            .read()
            .map_err(|err| lock_poisoned::<TaskTemplateRepositoryError>(&err))
    }

    fn write(&self) -> TaskTemplateRepositoryResult<RwLockWriteGuard<'_, InMemoryTemplateState>> {
        self.state
            .write()
            .map_err(|err| lock_poisoned::<TaskTemplateRepositoryError>(&err))
    }
}

#[async_trait]
impl TaskTemplateRepository for InMemoryTaskTemplateRepository {
    async fn store(&self, template: &TaskTemplate) -> TaskTemplateRepositoryResult<()> {
        let mut state = self.write()?;
        if state.templates.contains_key(&template.id()) {
            return Err(TaskTemplateRepositoryError::DuplicateTemplate(
                template.id(),
            ));
        }
        state.insertion_order.push(template.id());
        state.templates.insert(template.id(), template.clone());
        Ok(())
    }

    async fn update(&self, template: &TaskTemplate) -> TaskTemplateRepositoryResult<()> {
        let mut state = self.write()?;
        let slot = state
            .templates
            .get_mut(&template.id())
            .ok_or(TaskTemplateRepositoryError::NotFound(template.id()))?;
        *slot = template.clone();
        Ok(())
    }

    async fn delete(&self, id: TaskTemplateId) -> TaskTemplateRepositoryResult<()> {
        let mut state = self.write()?;
        if state.templates.remove(&id).is_none() {
            return Err(TaskTemplateRepositoryError::NotFound(id));
        }
        state.insertion_order.retain(|existing| *existing != id);
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: TaskTemplateId,
    ) -> TaskTemplateRepositoryResult<Option<TaskTemplate>> {
        Ok(self.read()?.templates.get(&id).cloned())
    }

    async fn list(
        &self,
        recurring: Option<bool>,
    ) -> TaskTemplateRepositoryResult<Vec<TaskTemplate>> {
        let state = self.read()?;
        Ok(state
            .insertion_order
            .iter()
            .filter_map(|id| state.templates.get(id))
            .filter(|template| recurring.is_none_or(|wanted| template.is_recurring() == wanted))
            .cloned()
            .collect())
    }
}
