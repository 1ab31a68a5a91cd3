//! `PostgreSQL` repository implementation for facility storage.

use super::{
    models::{CageRow, EmployeeRow, WarehouseRow},
    schema::{cages, employees, warehouses},
};
use crate::facility::{
    domain::{
        Cage, CageId, CageStatus, Employee, EmployeeId, PersistedCageData, PersistedEmployeeData,
        PersistedWarehouseData, Warehouse, WarehouseId,
    },
    ports::{FacilityRepository, FacilityRepositoryError, FacilityRepositoryResult},
};
use crate::pagination::{Page, PageRequest};
use crate::persistence::{PersistenceFailure, PgPool, run_blocking, to_total};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed facility repository.
#[derive(Debug, Clone)]
pub struct PostgresFacilityRepository {
    pool: PgPool,
}

impl PostgresFacilityRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FacilityRepository for PostgresFacilityRepository {
    async fn store_warehouse(&self, warehouse: &Warehouse) -> FacilityRepositoryResult<()> {
        let id = warehouse.id().into_inner();
        let row = WarehouseRow {
            id,
            name: warehouse.name().to_owned(),
            address: warehouse.address().map(str::to_owned),
            created_at: warehouse.created_at(),
            updated_at: warehouse.updated_at(),
        };
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(warehouses::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| map_insert_error(err, id))?;
            Ok(())
        })
        .await
    }

    async fn find_warehouse(&self, id: WarehouseId) -> FacilityRepositoryResult<Option<Warehouse>> {
        run_blocking(&self.pool, move |connection| {
            let row = warehouses::table
                .find(id.into_inner())
                .select(WarehouseRow::as_select())
                .first::<WarehouseRow>(connection)
                .optional()
                .map_err(FacilityRepositoryError::persistence)?;
            Ok(row.map(row_to_warehouse))
        })
        .await
    }

    async fn list_warehouses(&self, page: PageRequest) -> FacilityRepositoryResult<Page<Warehouse>> {
        run_blocking(&self.pool, move |connection| {
            let (rows, total) = connection
                .transaction(|conn| {
                    let total = warehouses::table.count().get_result::<i64>(conn)?;
                    let rows = warehouses::table
                        .order((warehouses::created_at.desc(), warehouses::id.desc()))
                        .limit(i64::from(page.per_page()))
                        .offset(sql_offset(page))
                        .select(WarehouseRow::as_select())
                        .load::<WarehouseRow>(conn)?;
                    Ok::<_, DieselError>((rows, total))
                })
                .map_err(FacilityRepositoryError::persistence)?;
            Ok(Page::new(
                rows.into_iter().map(row_to_warehouse).collect(),
                to_total::<FacilityRepositoryError>(total)?,
            ))
        })
        .await
    }

    async fn store_cage(&self, cage: &Cage) -> FacilityRepositoryResult<()> {
        let id = cage.id().into_inner();
        let warehouse_id = cage.warehouse_id();
        let row = to_cage_row(cage);
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(cages::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        FacilityRepositoryError::WarehouseNotFound(warehouse_id)
                    }
                    other => map_insert_error(other, id),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_cage(&self, cage: &Cage) -> FacilityRepositoryResult<()> {
        let cage_id = cage.id();
        let status = cage.status().as_str().to_owned();
        let updated_at = cage.updated_at();
        run_blocking(&self.pool, move |connection| {
            let updated = diesel::update(cages::table.find(cage_id.into_inner()))
                .set((cages::status.eq(status), cages::updated_at.eq(updated_at)))
                .execute(connection)
                .map_err(FacilityRepositoryError::persistence)?;
            if updated == 0 {
                return Err(FacilityRepositoryError::CageNotFound(cage_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_cage(&self, id: CageId) -> FacilityRepositoryResult<Option<Cage>> {
        run_blocking(&self.pool, move |connection| {
            let row = cages::table
                .find(id.into_inner())
                .select(CageRow::as_select())
                .first::<CageRow>(connection)
                .optional()
                .map_err(FacilityRepositoryError::persistence)?;
            row.map(row_to_cage).transpose()
        })
        .await
    }

    async fn find_cages(&self, ids: &[CageId]) -> FacilityRepositoryResult<Vec<Cage>> {
        let lookup: Vec<uuid::Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        run_blocking(&self.pool, move |connection| {
            let rows = cages::table
                .filter(cages::id.eq_any(lookup))
                .select(CageRow::as_select())
                .load::<CageRow>(connection)
                .map_err(FacilityRepositoryError::persistence)?;
            rows.into_iter().map(row_to_cage).collect()
        })
        .await
    }

    async fn list_cages(&self, warehouse_id: WarehouseId) -> FacilityRepositoryResult<Vec<Cage>> {
        run_blocking(&self.pool, move |connection| {
            let rows = cages::table
                .filter(cages::warehouse_id.eq(warehouse_id.into_inner()))
                .order((cages::code.asc(), cages::id.asc()))
                .select(CageRow::as_select())
                .load::<CageRow>(connection)
                .map_err(FacilityRepositoryError::persistence)?;
            rows.into_iter().map(row_to_cage).collect()
        })
        .await
    }

    async fn store_employee(&self, employee: &Employee) -> FacilityRepositoryResult<()> {
        let id = employee.id().into_inner();
        let row = EmployeeRow {
            id,
            name: employee.name().to_owned(),
            phone: employee.phone().to_owned(),
            role: employee.role().to_owned(),
            created_at: employee.created_at(),
            updated_at: employee.updated_at(),
        };
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(employees::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| map_insert_error(err, id))?;
            Ok(())
        })
        .await
    }

    async fn find_employee(&self, id: EmployeeId) -> FacilityRepositoryResult<Option<Employee>> {
        run_blocking(&self.pool, move |connection| {
            let row = employees::table
                .find(id.into_inner())
                .select(EmployeeRow::as_select())
                .first::<EmployeeRow>(connection)
                .optional()
                .map_err(FacilityRepositoryError::persistence)?;
            Ok(row.map(row_to_employee))
        })
        .await
    }

    async fn list_employees(&self, page: PageRequest) -> FacilityRepositoryResult<Page<Employee>> {
        run_blocking(&self.pool, move |connection| {
            let (rows, total) = connection
                .transaction(|conn| {
                    let total = employees::table.count().get_result::<i64>(conn)?;
                    let rows = employees::table
                        .order((employees::created_at.desc(), employees::id.desc()))
                        .limit(i64::from(page.per_page()))
                        .offset(sql_offset(page))
                        .select(EmployeeRow::as_select())
                        .load::<EmployeeRow>(conn)?;
                    Ok::<_, DieselError>((rows, total))
                })
                .map_err(FacilityRepositoryError::persistence)?;
            Ok(Page::new(
                rows.into_iter().map(row_to_employee).collect(),
                to_total::<FacilityRepositoryError>(total)?,
            ))
        })
        .await
    }
}

fn sql_offset(page: PageRequest) -> i64 {
    i64::try_from(page.offset()).unwrap_or(i64::MAX)
}

fn map_insert_error(err: DieselError, id: uuid::Uuid) -> FacilityRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            FacilityRepositoryError::Duplicate(id)
        }
        _ => FacilityRepositoryError::persistence(err),
    }
}

fn to_cage_row(cage: &Cage) -> CageRow {
    CageRow {
        id: cage.id().into_inner(),
        warehouse_id: cage.warehouse_id().into_inner(),
        code: cage.code().to_owned(),
        status: cage.status().as_str().to_owned(),
        created_at: cage.created_at(),
        updated_at: cage.updated_at(),
    }
}

fn row_to_warehouse(row: WarehouseRow) -> Warehouse {
    Warehouse::from_persisted(PersistedWarehouseData {
        id: WarehouseId::from_uuid(row.id),
        name: row.name,
        address: row.address,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn row_to_cage(row: CageRow) -> FacilityRepositoryResult<Cage> {
    let status = CageStatus::new(row.status).map_err(FacilityRepositoryError::persistence)?;
    Ok(Cage::from_persisted(PersistedCageData {
        id: CageId::from_uuid(row.id),
        warehouse_id: WarehouseId::from_uuid(row.warehouse_id),
        code: row.code,
        status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn row_to_employee(row: EmployeeRow) -> Employee {
    Employee::from_persisted(PersistedEmployeeData {
        id: EmployeeId::from_uuid(row.id),
        name: row.name,
        phone: row.phone,
        role: row.role,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
