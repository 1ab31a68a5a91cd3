//! `PostgreSQL` repository implementation for task templates.

use super::{
    models::{TaskTemplateChangeset, TaskTemplateRow},
    schema::task_templates,
};
use crate::persistence::{PersistenceFailure, PgPool, from_sql_int, run_blocking, to_sql_int};
use crate::task::{
    domain::{PersistedTaskTemplateData, RecurrenceType, TaskTemplate, TaskTemplateId},
    ports::{TaskTemplateRepository, TaskTemplateRepositoryError, TaskTemplateRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed template repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskTemplateRepository {
    pool: PgPool,
}

impl PostgresTaskTemplateRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskTemplateRepository for PostgresTaskTemplateRepository {
    async fn store(&self, template: &TaskTemplate) -> TaskTemplateRepositoryResult<()> {
        let template_id = template.id();
        let row = TaskTemplateRow {
            id: template_id.into_inner(),
            name: template.name().to_owned(),
            description: template.description().to_owned(),
            recurrence_type: template.recurrence_type().as_str().to_owned(),
            estimated_duration: template
                .estimated_duration()
                .map(to_sql_int::<TaskTemplateRepositoryError>)
                .transpose()?,
            created_at: template.created_at(),
            updated_at: template.updated_at(),
        };
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(task_templates::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskTemplateRepositoryError::DuplicateTemplate(template_id)
                    }
                    _ => TaskTemplateRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, template: &TaskTemplate) -> TaskTemplateRepositoryResult<()> {
        let template_id = template.id();
        let changeset = TaskTemplateChangeset {
            name: template.name().to_owned(),
            description: template.description().to_owned(),
            recurrence_type: template.recurrence_type().as_str().to_owned(),
            estimated_duration: template
                .estimated_duration()
                .map(to_sql_int::<TaskTemplateRepositoryError>)
                .transpose()?,
            updated_at: template.updated_at(),
        };
        run_blocking(&self.pool, move |connection| {
            let updated = diesel::update(task_templates::table.find(template_id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskTemplateRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskTemplateRepositoryError::NotFound(template_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskTemplateId) -> TaskTemplateRepositoryResult<()> {
        run_blocking(&self.pool, move |connection| {
            let deleted = diesel::delete(task_templates::table.find(id.into_inner()))
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TaskTemplateRepositoryError::StillReferenced(id)
                    }
                    _ => TaskTemplateRepositoryError::persistence(err),
                })?;
            if deleted == 0 {
                return Err(TaskTemplateRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: TaskTemplateId,
    ) -> TaskTemplateRepositoryResult<Option<TaskTemplate>> {
        run_blocking(&self.pool, move |connection| {
            let row = task_templates::table
                .find(id.into_inner())
                .select(TaskTemplateRow::as_select())
                .first::<TaskTemplateRow>(connection)
                .optional()
                .map_err(TaskTemplateRepositoryError::persistence)?;
            row.map(row_to_template).transpose()
        })
        .await
    }

    async fn list(
        &self,
        recurring: Option<bool>,
    ) -> TaskTemplateRepositoryResult<Vec<TaskTemplate>> {
        let one_off = RecurrenceType::None.as_str();
        run_blocking(&self.pool, move |connection| {
            let mut query = task_templates::table
                .order((task_templates::created_at.asc(), task_templates::id.asc()))
                .select(TaskTemplateRow::as_select())
                .into_boxed();
            query = match recurring {
                Some(true) => query.filter(task_templates::recurrence_type.ne(one_off)),
                Some(false) => query.filter(task_templates::recurrence_type.eq(one_off)),
                None => query,
            };
            let rows = query
                .load::<TaskTemplateRow>(connection)
                .map_err(TaskTemplateRepositoryError::persistence)?;
            rows.into_iter().map(row_to_template).collect()
        })
        .await
    }
}

fn row_to_template(row: TaskTemplateRow) -> TaskTemplateRepositoryResult<TaskTemplate> {
    let TaskTemplateRow {
        id,
        name,
        description,
        recurrence_type,
        estimated_duration,
        created_at,
        updated_at,
    } = row;
    let recurrence = RecurrenceType::try_from(recurrence_type.as_str())
        .map_err(TaskTemplateRepositoryError::persistence)?;
    Ok(TaskTemplate::from_persisted(PersistedTaskTemplateData {
        id: TaskTemplateId::from_uuid(id),
        name,
        description,
        recurrence_type: recurrence,
        estimated_duration: estimated_duration
            .map(from_sql_int::<TaskTemplateRepositoryError>)
            .transpose()?,
        created_at,
        updated_at,
    }))
}
