//! Repository port for warehouses, cages and employees.

use crate::error::{Classify, ErrorKind};
use crate::facility::domain::{Cage, CageId, Employee, EmployeeId, Warehouse, WarehouseId};
use crate::pagination::{Page, PageRequest};
use crate::persistence::PersistenceFailure;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for facility repository operations.
pub type FacilityRepositoryResult<T> = Result<T, FacilityRepositoryError>;

/// Facility persistence contract.
#[async_trait]
pub trait FacilityRepository: Send + Sync {
    /// Stores a new warehouse.
    async fn store_warehouse(&self, warehouse: &Warehouse) -> FacilityRepositoryResult<()>;

    /// Finds a warehouse by identifier.
    async fn find_warehouse(&self, id: WarehouseId) -> FacilityRepositoryResult<Option<Warehouse>>;

    /// Returns one page of warehouses, newest first.
    async fn list_warehouses(&self, page: PageRequest) -> FacilityRepositoryResult<Page<Warehouse>>;

    /// Stores a new cage.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityRepositoryError::WarehouseNotFound`] when the
    /// owning warehouse does not exist.
    async fn store_cage(&self, cage: &Cage) -> FacilityRepositoryResult<()>;

    /// Persists a changed cage status.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityRepositoryError::CageNotFound`] when the cage does
    /// not exist.
    async fn update_cage(&self, cage: &Cage) -> FacilityRepositoryResult<()>;

    /// Finds a cage by identifier.
    async fn find_cage(&self, id: CageId) -> FacilityRepositoryResult<Option<Cage>>;

    /// Returns the cages among `ids` that exist, in no particular order.
    async fn find_cages(&self, ids: &[CageId]) -> FacilityRepositoryResult<Vec<Cage>>;

    /// Returns every cage in a warehouse ordered by code.
    async fn list_cages(&self, warehouse_id: WarehouseId) -> FacilityRepositoryResult<Vec<Cage>>;

    /// Stores a new employee.
    async fn store_employee(&self, employee: &Employee) -> FacilityRepositoryResult<()>;

    /// Finds an employee by identifier.
    async fn find_employee(&self, id: EmployeeId) -> FacilityRepositoryResult<Option<Employee>>;

    /// Returns one page of employees, newest first.
    async fn list_employees(&self, page: PageRequest) -> FacilityRepositoryResult<Page<Employee>>;
}

/// Errors returned by facility repository implementations.
#[derive(Debug, Clone, Error)]
pub enum FacilityRepositoryError {
    /// A record with the same identifier already exists.
    #[error("duplicate facility record identifier: {0}")]
    Duplicate(uuid::Uuid),

    /// The warehouse was not found.
    #[error("warehouse not found: {0}")]
    WarehouseNotFound(WarehouseId),

    /// The cage was not found.
    #[error("cage not found: {0}")]
    CageNotFound(CageId),

    /// The employee was not found.
    #[error("employee not found: {0}")]
    EmployeeNotFound(EmployeeId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PersistenceFailure for FacilityRepositoryError {
    fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl Classify for FacilityRepositoryError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Duplicate(_) => ErrorKind::Conflict,
            Self::WarehouseNotFound(_) | Self::CageNotFound(_) | Self::EmployeeNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::Persistence(_) => ErrorKind::Persistence,
        }
    }
}
