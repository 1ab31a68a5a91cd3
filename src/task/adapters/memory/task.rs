//! In-memory task repository for tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::persistence::lock_poisoned;
use crate::task::{
    domain::{Task, TaskFilter, TaskId, TaskTemplateId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    insertion_order: Vec<TaskId>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state
            .read()
            .map_err(|err| lock_poisoned::<TaskRepositoryError>(&err))
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state
            .write()
            .map_err(|err| lock_poisoned::<TaskRepositoryError>(&err))
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store_all(&self, tasks: &[Task]) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if let Some(duplicate) = tasks
            .iter()
            .find(|task| state.tasks.contains_key(&task.id()))
        {
            return Err(TaskRepositoryError::DuplicateTask(duplicate.id()));
        }
        for task in tasks {
            state.insertion_order.push(task.id());
            state.tasks.insert(task.id(), task.clone());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        Ok(self.read()?.tasks.get(&id).cloned())
    }

    async fn update(&self, task: &Task, expected_revision: u32) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        let slot = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        if slot.revision() != expected_revision {
            return Err(TaskRepositoryError::RevisionConflict {
                task_id: task.id(),
                expected: expected_revision,
            });
        }
        *slot = task.clone();
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if state.tasks.remove(&id).is_none() {
            return Err(TaskRepositoryError::NotFound(id));
        }
        state.insertion_order.retain(|existing| *existing != id);
        Ok(())
    }

    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut matching: Vec<Task> = state
            .insertion_order
            .iter()
            .filter_map(|id| state.tasks.get(id))
            .filter(|task| filter.matches(task))
            .cloned()
            .collect();
        matching.sort_by_key(Task::scheduled_time);
        Ok(matching)
    }

    async fn references_template(
        &self,
        template_id: TaskTemplateId,
    ) -> TaskRepositoryResult<bool> {
        Ok(self
            .read()?
            .tasks
            .values()
            .any(|task| task.template_id() == template_id))
    }
}
