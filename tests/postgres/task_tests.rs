//! Task persistence against `PostgreSQL`: cage links, filtered listing and
//! revision-checked transitions.

use super::helpers::{TestDatabase, test_runtime};
use cagekeeper::error::{Classify, ErrorKind};
use cagekeeper::facility::{
    adapters::postgres::PostgresFacilityRepository,
    domain::{CageId, EmployeeId, WarehouseId},
    services::{CreateCageRequest, CreateEmployeeRequest, CreateWarehouseRequest, FacilityService},
};
use cagekeeper::task::{
    adapters::postgres::{PostgresTaskRepository, PostgresTaskTemplateRepository},
    domain::{Task, TaskId, TaskStatus, TaskTemplateId},
    ports::{TaskRepository, TaskRepositoryError},
    services::{
        CreateTaskTemplateRequest, CreateTasksForCagesRequest, TaskLifecycleService,
        TaskListQuery, TaskTemplateService,
    },
};
use eyre::ensure;
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use std::sync::Arc;

struct TaskContext {
    tasks: Arc<PostgresTaskRepository>,
    facility: FacilityService<PostgresFacilityRepository, DefaultClock>,
    templates:
        TaskTemplateService<PostgresTaskTemplateRepository, PostgresTaskRepository, DefaultClock>,
    lifecycle: TaskLifecycleService<
        PostgresTaskRepository,
        PostgresTaskTemplateRepository,
        PostgresFacilityRepository,
        DefaultClock,
    >,
}

struct Site {
    template: TaskTemplateId,
    warehouse: WarehouseId,
    cages: Vec<CageId>,
    worker: EmployeeId,
}

fn context(db: &TestDatabase) -> eyre::Result<TaskContext> {
    let clock = Arc::new(DefaultClock);
    let tasks = Arc::new(PostgresTaskRepository::new(db.pool()?));
    let templates = Arc::new(PostgresTaskTemplateRepository::new(db.pool()?));
    let facility = Arc::new(PostgresFacilityRepository::new(db.pool()?));
    Ok(TaskContext {
        facility: FacilityService::new(Arc::clone(&facility), Arc::clone(&clock)),
        templates: TaskTemplateService::new(
            Arc::clone(&templates),
            Arc::clone(&tasks),
            Arc::clone(&clock),
        ),
        lifecycle: TaskLifecycleService::new(Arc::clone(&tasks), templates, facility, clock),
        tasks,
    })
}

impl TaskContext {
    async fn seed_site(&self, cage_codes: &[&str]) -> eyre::Result<Site> {
        let template = self
            .templates
            .create_task_template(
                CreateTaskTemplateRequest::new("Clean", "weekly").with_estimated_duration(45),
            )
            .await?
            .id();
        let warehouse = self
            .facility
            .create_warehouse(CreateWarehouseRequest::new("South barn"))
            .await?
            .id();
        let mut cages = Vec::with_capacity(cage_codes.len());
        for code in cage_codes {
            let cage = self
                .facility
                .create_cage(CreateCageRequest::new(warehouse, *code))
                .await?;
            cages.push(cage.id());
        }
        let worker = self
            .facility
            .create_employee(CreateEmployeeRequest::new("Lee", "555-0110", "cleaner"))
            .await?
            .id();
        Ok(Site {
            template,
            warehouse,
            cages,
            worker,
        })
    }

    async fn create_for_cages(&self, site: &Site) -> eyre::Result<Vec<TaskId>> {
        let created = self
            .lifecycle
            .create_tasks_for_cages(CreateTasksForCagesRequest::new(
                site.template,
                site.warehouse,
                site.worker,
                "2026-03-02 07:30:00",
                site.cages.clone(),
            ))
            .await?;
        Ok(created.iter().map(Task::id).collect())
    }
}

#[rstest]
fn one_task_per_cage_with_its_link(shared_test_cluster: &'static TestCluster) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster, "task_per_cage")?;
    let ctx = context(&db)?;
    let rt = test_runtime()?;

    rt.block_on(async {
        let site = ctx.seed_site(&["S-1", "S-2", "S-3"]).await?;
        let ids = ctx.create_for_cages(&site).await?;
        ensure!(ids.len() == 3, "one task per cage");

        for (id, cage) in ids.iter().zip(&site.cages) {
            let task = ctx.lifecycle.get_task(*id).await?;
            ensure!(task.cage_ids() == [*cage], "task {id} linked to {cage}");
            ensure!(task.status() == TaskStatus::Pending, "new tasks are pending");
        }

        let listed = ctx
            .lifecycle
            .get_task_list(
                TaskListQuery::new()
                    .with_assignee(site.worker)
                    .with_status("PENDING")
                    .with_start_date("2026-03-02")
                    .with_end_date("2026-03-02"),
            )
            .await?;
        ensure!(listed.len() == 3, "filters keep every seeded task");
        Ok::<(), eyre::Report>(())
    })
}

#[rstest]
fn stale_revision_is_a_conflict(shared_test_cluster: &'static TestCluster) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster, "task_revision")?;
    let ctx = context(&db)?;
    let rt = test_runtime()?;

    rt.block_on(async {
        let site = ctx.seed_site(&["S-1"]).await?;
        let ids = ctx.create_for_cages(&site).await?;
        let id = *ids
            .first()
            .ok_or_else(|| eyre::eyre!("no task created"))?;

        let mut first_reader = ctx.lifecycle.get_task(id).await?;
        let mut second_reader = first_reader.clone();
        let read_revision = first_reader.revision();

        first_reader.start(&DefaultClock)?;
        ctx.tasks.update(&first_reader, read_revision).await?;

        second_reader.start(&DefaultClock)?;
        let stale = ctx.tasks.update(&second_reader, read_revision).await;
        ensure!(
            matches!(
                stale,
                Err(TaskRepositoryError::RevisionConflict { task_id, .. }) if task_id == id
            ),
            "expected revision conflict, got {stale:?}"
        );

        let stored = ctx.lifecycle.get_task(id).await?;
        ensure!(stored.revision() == read_revision + 1, "only one write landed");
        ensure!(stored.status() == TaskStatus::InProgress, "first write kept");
        Ok::<(), eyre::Report>(())
    })
}

#[rstest]
fn completion_persists_duration_and_blocks_template_delete(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster, "task_complete")?;
    let ctx = context(&db)?;
    let rt = test_runtime()?;

    rt.block_on(async {
        let site = ctx.seed_site(&["S-1"]).await?;
        let ids = ctx.create_for_cages(&site).await?;
        let id = *ids
            .first()
            .ok_or_else(|| eyre::eyre!("no task created"))?;

        ctx.lifecycle.start_task(id).await?;
        ctx.lifecycle.complete_task(id, 52).await?;

        let stored = ctx.lifecycle.get_task(id).await?;
        ensure!(stored.status() == TaskStatus::Completed, "task completed");
        ensure!(stored.actual_duration() == Some(52), "duration stored");
        ensure!(stored.completed_time().is_some(), "completion time stored");

        let refused = ctx.templates.delete_task_template(site.template).await;
        ensure!(
            refused.is_err_and(|err| err.kind() == ErrorKind::Conflict),
            "referenced template must not be deleted"
        );

        ctx.lifecycle.delete_task(id).await?;
        ensure!(
            ctx.tasks.find_by_id(id).await?.is_none(),
            "task and its cage links removed"
        );
        ctx.templates.delete_task_template(site.template).await?;
        Ok::<(), eyre::Report>(())
    })
}
