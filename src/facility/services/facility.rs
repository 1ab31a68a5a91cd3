//! Service layer for warehouses, cages and employees.

use crate::error::{Classify, ErrorKind};
use crate::facility::{
    domain::{
        Cage, CageId, CageStatus, Employee, EmployeeId, FacilityDomainError, Warehouse,
        WarehouseId,
    },
    ports::{FacilityRepository, FacilityRepositoryError},
};
use crate::pagination::{Page, PageRequest};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a warehouse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateWarehouseRequest {
    name: String,
    address: Option<String>,
}

impl CreateWarehouseRequest {
    /// Creates a request with the warehouse name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: None,
        }
    }

    /// Sets the postal address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

/// Request payload for creating a cage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCageRequest {
    warehouse_id: WarehouseId,
    code: String,
    status: Option<String>,
}

impl CreateCageRequest {
    /// Creates a request for a cage with the default status.
    #[must_use]
    pub fn new(warehouse_id: WarehouseId, code: impl Into<String>) -> Self {
        Self {
            warehouse_id,
            code: code.into(),
            status: None,
        }
    }

    /// Sets an explicit initial status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Request payload for creating an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEmployeeRequest {
    name: String,
    phone: String,
    role: String,
}

impl CreateEmployeeRequest {
    /// Creates a request with every employee field.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            role: role.into(),
        }
    }
}

/// Service-level errors for facility operations.
#[derive(Debug, Error)]
pub enum FacilityServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] FacilityDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] FacilityRepositoryError),
}

impl Classify for FacilityServiceError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::Repository(err) => err.kind(),
        }
    }
}

/// Result type for facility service operations.
pub type FacilityServiceResult<T> = Result<T, FacilityServiceError>;

/// Facility record orchestration service.
#[derive(Clone)]
pub struct FacilityService<R, C>
where
    R: FacilityRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> FacilityService<R, C>
where
    R: FacilityRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new facility service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a warehouse.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityServiceError`] when the name is blank or
    /// persistence fails.
    pub async fn create_warehouse(
        &self,
        request: CreateWarehouseRequest,
    ) -> FacilityServiceResult<Warehouse> {
        let warehouse = Warehouse::new(request.name, request.address, &*self.clock)?;
        self.repository.store_warehouse(&warehouse).await?;
        tracing::info!(warehouse_id = %warehouse.id(), "warehouse created");
        Ok(warehouse)
    }

    /// Returns a warehouse by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityRepositoryError::WarehouseNotFound`] (wrapped) when
    /// the warehouse does not exist.
    pub async fn get_warehouse(&self, id: WarehouseId) -> FacilityServiceResult<Warehouse> {
        self.repository
            .find_warehouse(id)
            .await?
            .ok_or_else(|| FacilityRepositoryError::WarehouseNotFound(id).into())
    }

    /// Returns one page of warehouses, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_warehouses(
        &self,
        page: PageRequest,
    ) -> FacilityServiceResult<Page<Warehouse>> {
        Ok(self.repository.list_warehouses(page).await?)
    }

    /// Creates a cage inside an existing warehouse.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityServiceError`] when the code or status is blank,
    /// the warehouse does not exist, or persistence fails.
    pub async fn create_cage(&self, request: CreateCageRequest) -> FacilityServiceResult<Cage> {
        let CreateCageRequest {
            warehouse_id,
            code,
            status,
        } = request;
        let cage_status = status.map_or_else(|| Ok(CageStatus::default()), CageStatus::new)?;
        self.get_warehouse(warehouse_id).await?;

        let cage = Cage::new(warehouse_id, code, cage_status, &*self.clock)?;
        self.repository.store_cage(&cage).await?;
        tracing::info!(cage_id = %cage.id(), warehouse_id = %warehouse_id, "cage created");
        Ok(cage)
    }

    /// Returns a cage by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityRepositoryError::CageNotFound`] (wrapped) when the
    /// cage does not exist.
    pub async fn get_cage(&self, id: CageId) -> FacilityServiceResult<Cage> {
        self.repository
            .find_cage(id)
            .await?
            .ok_or_else(|| FacilityRepositoryError::CageNotFound(id).into())
    }

    /// Returns every cage in a warehouse ordered by code.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityRepositoryError::WarehouseNotFound`] (wrapped) when
    /// the warehouse does not exist.
    pub async fn list_cages(&self, warehouse_id: WarehouseId) -> FacilityServiceResult<Vec<Cage>> {
        self.get_warehouse(warehouse_id).await?;
        Ok(self.repository.list_cages(warehouse_id).await?)
    }

    /// Replaces a cage's status label.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityServiceError`] when the label is blank, the cage
    /// does not exist, or persistence fails.
    pub async fn set_cage_status(
        &self,
        id: CageId,
        status: impl Into<String> + Send,
    ) -> FacilityServiceResult<Cage> {
        let cage_status = CageStatus::new(status)?;
        let mut cage = self.get_cage(id).await?;
        cage.set_status(cage_status, &*self.clock);
        self.repository.update_cage(&cage).await?;
        tracing::info!(cage_id = %id, status = %cage.status(), "cage status changed");
        Ok(cage)
    }

    /// Creates an employee.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityServiceError`] when a field is blank or persistence
    /// fails.
    pub async fn create_employee(
        &self,
        request: CreateEmployeeRequest,
    ) -> FacilityServiceResult<Employee> {
        let employee = Employee::new(request.name, request.phone, request.role, &*self.clock)?;
        self.repository.store_employee(&employee).await?;
        tracing::info!(employee_id = %employee.id(), "employee created");
        Ok(employee)
    }

    /// Returns an employee by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityRepositoryError::EmployeeNotFound`] (wrapped) when
    /// the employee does not exist.
    pub async fn get_employee(&self, id: EmployeeId) -> FacilityServiceResult<Employee> {
        self.repository
            .find_employee(id)
            .await?
            .ok_or_else(|| FacilityRepositoryError::EmployeeNotFound(id).into())
    }

    /// Returns one page of employees, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_employees(&self, page: PageRequest) -> FacilityServiceResult<Page<Employee>> {
        Ok(self.repository.list_employees(page).await?)
    }
}
