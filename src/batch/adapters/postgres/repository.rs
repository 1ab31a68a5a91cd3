//! `PostgreSQL` repository implementation for batch storage.

use super::{
    models::{BatchRow, CollarRow},
    schema::{batches, collars},
};
use crate::batch::{
    domain::{
        Batch, BatchId, BatchIssue, Collar, CollarCode, CollarCount, CollarId,
        PersistedBatchData, PersistedCollarData,
    },
    ports::{BatchRepository, BatchRepositoryError, BatchRepositoryResult},
};
use crate::merchant::domain::MerchantId;
use crate::pagination::{Page, PageRequest};
use crate::persistence::{
    PersistenceFailure, PgPool, from_sql_int, run_blocking, to_sql_int, to_total,
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed batch repository.
#[derive(Debug, Clone)]
pub struct PostgresBatchRepository {
    pool: PgPool,
}

impl PostgresBatchRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BatchRepository for PostgresBatchRepository {
    async fn store_issue(&self, issue: &BatchIssue) -> BatchRepositoryResult<()> {
        let batch = issue.batch();
        let batch_id = batch.id();
        let merchant_id = batch.merchant_id();
        let batch_row = BatchRow {
            id: batch_id.into_inner(),
            merchant_id: merchant_id.into_inner(),
            collar_count: to_sql_int::<BatchRepositoryError>(batch.collar_count().value())?,
            created_at: batch.created_at(),
        };
        let collar_rows: Vec<CollarRow> = issue.collars().iter().map(to_collar_row).collect();

        run_blocking(&self.pool, move |connection| {
            connection
                .transaction(|conn| {
                    diesel::insert_into(batches::table)
                        .values(&batch_row)
                        .execute(conn)?;
                    diesel::insert_into(collars::table)
                        .values(&collar_rows)
                        .execute(conn)?;
                    Ok::<_, DieselError>(())
                })
                .map_err(|err| map_issue_error(err, batch_id, merchant_id))
        })
        .await
    }

    async fn find_by_id(&self, id: BatchId) -> BatchRepositoryResult<Option<Batch>> {
        run_blocking(&self.pool, move |connection| {
            let row = batches::table
                .find(id.into_inner())
                .select(BatchRow::as_select())
                .first::<BatchRow>(connection)
                .optional()
                .map_err(BatchRepositoryError::persistence)?;
            row.map(row_to_batch).transpose()
        })
        .await
    }

    async fn list(&self, page: PageRequest) -> BatchRepositoryResult<Page<Batch>> {
        run_blocking(&self.pool, move |connection| {
            load_batch_page(connection, None, page)
        })
        .await
    }

    async fn list_by_merchant(
        &self,
        merchant_id: MerchantId,
        page: PageRequest,
    ) -> BatchRepositoryResult<Page<Batch>> {
        run_blocking(&self.pool, move |connection| {
            load_batch_page(connection, Some(merchant_id), page)
        })
        .await
    }

    async fn list_collars(
        &self,
        batch_id: BatchId,
        page: PageRequest,
    ) -> BatchRepositoryResult<Page<Collar>> {
        run_blocking(&self.pool, move |connection| {
            let (rows, total) = connection
                .transaction(|conn| {
                    let scoped = collars::table.filter(collars::batch_id.eq(batch_id.into_inner()));
                    let total = scoped.count().get_result::<i64>(conn)?;
                    let rows = scoped
                        .order((collars::created_at.desc(), collars::id.asc()))
                        .limit(i64::from(page.per_page()))
                        .offset(sql_offset(page))
                        .select(CollarRow::as_select())
                        .load::<CollarRow>(conn)?;
                    Ok::<_, DieselError>((rows, total))
                })
                .map_err(BatchRepositoryError::persistence)?;
            let items = rows
                .into_iter()
                .map(row_to_collar)
                .collect::<BatchRepositoryResult<Vec<_>>>()?;
            Ok(Page::new(items, to_total::<BatchRepositoryError>(total)?))
        })
        .await
    }

    async fn find_collar_by_code(
        &self,
        code: &CollarCode,
    ) -> BatchRepositoryResult<Option<Collar>> {
        let lookup = code.as_str().to_owned();
        run_blocking(&self.pool, move |connection| {
            let row = collars::table
                .filter(collars::collar_code.eq(lookup))
                .select(CollarRow::as_select())
                .first::<CollarRow>(connection)
                .optional()
                .map_err(BatchRepositoryError::persistence)?;
            row.map(row_to_collar).transpose()
        })
        .await
    }

    async fn references_merchant(&self, merchant_id: MerchantId) -> BatchRepositoryResult<bool> {
        run_blocking(&self.pool, move |connection| {
            diesel::select(diesel::dsl::exists(
                batches::table.filter(batches::merchant_id.eq(merchant_id.into_inner())),
            ))
            .get_result::<bool>(connection)
            .map_err(BatchRepositoryError::persistence)
        })
        .await
    }
}

fn load_batch_page(
    connection: &mut PgConnection,
    merchant_id: Option<MerchantId>,
    page: PageRequest,
) -> BatchRepositoryResult<Page<Batch>> {
    let (rows, total) = connection
        .transaction(|conn| {
            let mut count_query = batches::table.into_boxed();
            let mut rows_query = batches::table.into_boxed();
            if let Some(owner) = merchant_id {
                count_query = count_query.filter(batches::merchant_id.eq(owner.into_inner()));
                rows_query = rows_query.filter(batches::merchant_id.eq(owner.into_inner()));
            }
            let total = count_query.count().get_result::<i64>(conn)?;
            let rows = rows_query
                .order((batches::created_at.desc(), batches::id.desc()))
                .limit(i64::from(page.per_page()))
                .offset(sql_offset(page))
                .select(BatchRow::as_select())
                .load::<BatchRow>(conn)?;
            Ok::<_, DieselError>((rows, total))
        })
        .map_err(BatchRepositoryError::persistence)?;
    let items = rows
        .into_iter()
        .map(row_to_batch)
        .collect::<BatchRepositoryResult<Vec<_>>>()?;
    Ok(Page::new(items, to_total::<BatchRepositoryError>(total)?))
}

fn sql_offset(page: PageRequest) -> i64 {
    i64::try_from(page.offset()).unwrap_or(i64::MAX)
}

fn map_issue_error(
    err: DieselError,
    batch_id: BatchId,
    merchant_id: MerchantId,
) -> BatchRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
            if is_collar_code_unique_violation(info.as_ref()) =>
        {
            BatchRepositoryError::CollarCodeCollision(batch_id)
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            BatchRepositoryError::DuplicateBatch(batch_id)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            BatchRepositoryError::MerchantMissing(merchant_id)
        }
        _ => BatchRepositoryError::persistence(err),
    }
}

fn is_collar_code_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_collars_code_unique")
}

fn to_collar_row(collar: &Collar) -> CollarRow {
    CollarRow {
        id: collar.id().into_inner(),
        merchant_id: collar.merchant_id().into_inner(),
        batch_id: collar.batch_id().into_inner(),
        collar_code: collar.collar_code().as_str().to_owned(),
        created_at: collar.created_at(),
    }
}

fn row_to_batch(row: BatchRow) -> BatchRepositoryResult<Batch> {
    let BatchRow {
        id,
        merchant_id,
        collar_count,
        created_at,
    } = row;
    Ok(Batch::from_persisted(PersistedBatchData {
        id: BatchId::from_uuid(id),
        merchant_id: MerchantId::from_uuid(merchant_id),
        collar_count: CollarCount::from_persisted(from_sql_int::<BatchRepositoryError>(
            collar_count,
        )?),
        created_at,
    }))
}

fn row_to_collar(row: CollarRow) -> BatchRepositoryResult<Collar> {
    let CollarRow {
        id,
        merchant_id,
        batch_id,
        collar_code,
        created_at,
    } = row;
    let code = CollarCode::parse(&collar_code).map_err(BatchRepositoryError::persistence)?;
    Ok(Collar::from_persisted(PersistedCollarData {
        id: CollarId::from_uuid(id),
        merchant_id: MerchantId::from_uuid(merchant_id),
        batch_id: BatchId::from_uuid(batch_id),
        collar_code: code,
        created_at,
    }))
}
