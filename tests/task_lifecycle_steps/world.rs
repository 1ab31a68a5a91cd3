//! Shared world state for task lifecycle BDD scenarios.

use std::sync::Arc;

use cagekeeper::facility::{
    adapters::memory::InMemoryFacilityRepository,
    domain::{CageId, EmployeeId, WarehouseId},
    services::FacilityService,
};
use cagekeeper::task::{
    adapters::memory::{InMemoryTaskRepository, InMemoryTaskTemplateRepository},
    domain::{Task, TaskTemplate},
    services::{
        CreateTasksForCagesRequest, TaskLifecycleError, TaskLifecycleService, TaskTemplateService,
    },
};
use mockable::DefaultClock;
use rstest::fixture;

/// Lifecycle service type used by the BDD world.
pub type TestLifecycleService = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemoryTaskTemplateRepository,
    InMemoryFacilityRepository,
    DefaultClock,
>;

/// Scenario world for task lifecycle behaviour tests.
pub struct TaskLifecycleWorld {
    pub lifecycle: TestLifecycleService,
    pub templates:
        TaskTemplateService<InMemoryTaskTemplateRepository, InMemoryTaskRepository, DefaultClock>,
    pub facility: FacilityService<InMemoryFacilityRepository, DefaultClock>,
    pub warehouse: Option<WarehouseId>,
    pub cages: Vec<CageId>,
    pub worker: Option<EmployeeId>,
    pub template: Option<TaskTemplate>,
    pub created: Vec<Task>,
    pub last_creation_result: Option<Result<Vec<Task>, TaskLifecycleError>>,
    pub last_transition_result: Option<Result<Task, TaskLifecycleError>>,
}

impl TaskLifecycleWorld {
    /// Creates a world with empty scenario state.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let facility_repo = Arc::new(InMemoryFacilityRepository::new());
        let template_repo = Arc::new(InMemoryTaskTemplateRepository::new());
        let task_repo = Arc::new(InMemoryTaskRepository::new());

        Self {
            lifecycle: TaskLifecycleService::new(
                Arc::clone(&task_repo),
                Arc::clone(&template_repo),
                Arc::clone(&facility_repo),
                Arc::clone(&clock),
            ),
            templates: TaskTemplateService::new(template_repo, task_repo, Arc::clone(&clock)),
            facility: FacilityService::new(facility_repo, clock),
            warehouse: None,
            cages: Vec::new(),
            worker: None,
            template: None,
            created: Vec::new(),
            last_creation_result: None,
            last_transition_result: None,
        }
    }

    /// Returns the first task created in the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn first_task(&self) -> Result<&Task, eyre::Report> {
        self.created
            .first()
            .ok_or_else(|| eyre::eyre!("no task created in scenario world"))
    }
}

impl Default for TaskLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskLifecycleWorld {
    TaskLifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Creates one task per seeded cage and records the outcome.
///
/// # Errors
///
/// Returns an error when the scenario has not seeded a template, warehouse
/// and worker yet.
pub fn create_for_every_cage(
    world: &mut TaskLifecycleWorld,
    scheduled_time: String,
) -> Result<(), eyre::Report> {
    let template_id = world
        .template
        .as_ref()
        .map(TaskTemplate::id)
        .ok_or_else(|| eyre::eyre!("missing template in scenario world"))?;
    let warehouse_id = world
        .warehouse
        .ok_or_else(|| eyre::eyre!("missing warehouse in scenario world"))?;
    let worker_id = world
        .worker
        .ok_or_else(|| eyre::eyre!("missing worker in scenario world"))?;

    let result = run_async(world.lifecycle.create_tasks_for_cages(
        CreateTasksForCagesRequest::new(
            template_id,
            warehouse_id,
            worker_id,
            scheduled_time,
            world.cages.clone(),
        ),
    ));
    if let Ok(ref created) = result {
        world.created.clone_from(created);
    }
    world.last_creation_result = Some(result);
    Ok(())
}
