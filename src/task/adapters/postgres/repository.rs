//! `PostgreSQL` repository implementation for task lifecycle storage.

use super::{
    models::{TaskCageRow, TaskLifecycleChangeset, TaskRow},
    schema::{task_cages, tasks},
};
use crate::facility::domain::{CageId, EmployeeId, WarehouseId};
use crate::persistence::{PersistenceFailure, PgPool, from_sql_int, run_blocking, to_sql_int};
use crate::task::{
    domain::{PersistedTaskData, Task, TaskFilter, TaskId, TaskStatus, TaskTemplateId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::HashMap;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store_all(&self, new_tasks: &[Task]) -> TaskRepositoryResult<()> {
        let task_rows = new_tasks
            .iter()
            .map(to_task_row)
            .collect::<TaskRepositoryResult<Vec<_>>>()?;
        let link_rows: Vec<TaskCageRow> = new_tasks
            .iter()
            .flat_map(|task| {
                task.cage_ids().iter().map(|cage_id| TaskCageRow {
                    task_id: task.id().into_inner(),
                    cage_id: cage_id.into_inner(),
                    created_at: task.created_at(),
                })
            })
            .collect();
        let first_id = new_tasks.first().map(Task::id);

        run_blocking(&self.pool, move |connection| {
            connection
                .transaction(|conn| {
                    diesel::insert_into(tasks::table)
                        .values(&task_rows)
                        .execute(conn)?;
                    if !link_rows.is_empty() {
                        diesel::insert_into(task_cages::table)
                            .values(&link_rows)
                            .execute(conn)?;
                    }
                    Ok::<_, DieselError>(())
                })
                .map_err(|err| match (err, first_id) {
                    (
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _),
                        Some(task_id),
                    ) => TaskRepositoryError::DuplicateTask(task_id),
                    (
                        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _),
                        Some(task_id),
                    ) => TaskRepositoryError::MissingReference(task_id),
                    (other, _) => TaskRepositoryError::persistence(other),
                })
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        run_blocking(&self.pool, move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            let Some(found) = row else {
                return Ok(None);
            };
            Ok(attach_cages(connection, vec![found])?.into_iter().next())
        })
        .await
    }

    async fn update(&self, task: &Task, expected_revision: u32) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let expected = to_sql_int::<TaskRepositoryError>(expected_revision)?;
        let changeset = TaskLifecycleChangeset {
            status: task.status().as_str().to_owned(),
            completed_time: task.completed_time(),
            actual_duration: task
                .actual_duration()
                .map(to_sql_int::<TaskRepositoryError>)
                .transpose()?,
            revision: to_sql_int::<TaskRepositoryError>(task.revision())?,
            updated_at: task.updated_at(),
        };

        run_blocking(&self.pool, move |connection| {
            let updated = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(task_id.into_inner()))
                    .filter(tasks::revision.eq(expected)),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;
            if updated > 0 {
                return Ok(());
            }
            let exists = diesel::select(diesel::dsl::exists(
                tasks::table.filter(tasks::id.eq(task_id.into_inner())),
            ))
            .get_result::<bool>(connection)
            .map_err(TaskRepositoryError::persistence)?;
            if exists {
                Err(TaskRepositoryError::RevisionConflict {
                    task_id,
                    expected: expected_revision,
                })
            } else {
                Err(TaskRepositoryError::NotFound(task_id))
            }
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        run_blocking(&self.pool, move |connection| {
            let deleted = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let criteria = *filter;
        run_blocking(&self.pool, move |connection| {
            let mut query = tasks::table
                .order((
                    tasks::scheduled_time.asc(),
                    tasks::created_at.asc(),
                    tasks::id.asc(),
                ))
                .select(TaskRow::as_select())
                .into_boxed();
            if let Some(status) = criteria.status {
                query = query.filter(tasks::status.eq(status.as_str()));
            }
            if let Some(assignee) = criteria.assignee_id {
                query = query.filter(tasks::assignee_id.eq(assignee.into_inner()));
            }
            if let Some(warehouse) = criteria.warehouse_id {
                query = query.filter(tasks::warehouse_id.eq(warehouse.into_inner()));
            }
            if let Some(template) = criteria.template_id {
                query = query.filter(tasks::template_id.eq(template.into_inner()));
            }
            if let Some(start) = criteria.scheduled_from {
                query = query.filter(tasks::scheduled_time.ge(start));
            }
            if let Some(end) = criteria.scheduled_to {
                query = query.filter(tasks::scheduled_time.le(end));
            }
            let rows = query
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            attach_cages(connection, rows)
        })
        .await
    }

    async fn references_template(
        &self,
        template_id: TaskTemplateId,
    ) -> TaskRepositoryResult<bool> {
        run_blocking(&self.pool, move |connection| {
            diesel::select(diesel::dsl::exists(
                tasks::table.filter(tasks::template_id.eq(template_id.into_inner())),
            ))
            .get_result::<bool>(connection)
            .map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

/// Loads the cage links for `rows` and builds the aggregates, keeping row
/// order.
fn attach_cages(
    connection: &mut PgConnection,
    rows: Vec<TaskRow>,
) -> TaskRepositoryResult<Vec<Task>> {
    let task_ids: Vec<uuid::Uuid> = rows.iter().map(|row| row.id).collect();
    let links = task_cages::table
        .filter(task_cages::task_id.eq_any(&task_ids))
        .order((task_cages::created_at.asc(), task_cages::cage_id.asc()))
        .select(TaskCageRow::as_select())
        .load::<TaskCageRow>(connection)
        .map_err(TaskRepositoryError::persistence)?;

    let mut cages_by_task: HashMap<uuid::Uuid, Vec<CageId>> = HashMap::new();
    for link in links {
        cages_by_task
            .entry(link.task_id)
            .or_default()
            .push(CageId::from_uuid(link.cage_id));
    }

    rows.into_iter()
        .map(|row| {
            let cage_ids = cages_by_task.remove(&row.id).unwrap_or_default();
            row_to_task(row, cage_ids)
        })
        .collect()
}

fn to_task_row(task: &Task) -> TaskRepositoryResult<TaskRow> {
    Ok(TaskRow {
        id: task.id().into_inner(),
        template_id: task.template_id().into_inner(),
        warehouse_id: task.warehouse_id().into_inner(),
        assignee_id: task.assignee_id().into_inner(),
        status: task.status().as_str().to_owned(),
        scheduled_time: task.scheduled_time(),
        completed_time: task.completed_time(),
        actual_duration: task
            .actual_duration()
            .map(to_sql_int::<TaskRepositoryError>)
            .transpose()?,
        revision: to_sql_int::<TaskRepositoryError>(task.revision())?,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow, cage_ids: Vec<CageId>) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        template_id,
        warehouse_id,
        assignee_id,
        status,
        scheduled_time,
        completed_time,
        actual_duration,
        revision,
        created_at,
        updated_at,
    } = row;
    let persisted_status =
        TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        template_id: TaskTemplateId::from_uuid(template_id),
        warehouse_id: WarehouseId::from_uuid(warehouse_id),
        assignee_id: EmployeeId::from_uuid(assignee_id),
        status: persisted_status,
        scheduled_time,
        completed_time,
        actual_duration: actual_duration
            .map(from_sql_int::<TaskRepositoryError>)
            .transpose()?,
        cage_ids,
        revision: from_sql_int::<TaskRepositoryError>(revision)?,
        created_at,
        updated_at,
    }))
}
