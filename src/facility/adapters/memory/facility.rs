//! In-memory facility repository for tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::facility::{
    domain::{Cage, CageId, Employee, EmployeeId, Warehouse, WarehouseId},
    ports::{FacilityRepository, FacilityRepositoryError, FacilityRepositoryResult},
};
use crate::pagination::{Page, PageRequest};
use crate::persistence::lock_poisoned;

/// Thread-safe in-memory facility repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFacilityRepository {
    state: Arc<RwLock<InMemoryFacilityState>>,
}

#[derive(Debug, Default)]
struct InMemoryFacilityState {
    warehouses: OrderedTable<WarehouseId, Warehouse>,
    cages: HashMap<CageId, Cage>,
    employees: OrderedTable<EmployeeId, Employee>,
}

/// Rows keyed by identifier that remember insertion order.
#[derive(Debug)]
struct OrderedTable<K, V> {
    rows: HashMap<K, V>,
    order: Vec<K>,
}

impl<K, V> Default for OrderedTable<K, V> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<K: Copy + Eq + Hash, V: Clone> OrderedTable<K, V> {
    fn insert(&mut self, key: K, value: V) -> bool {
        if self.rows.contains_key(&key) {
            return false;
        }
        self.order.push(key);
        self.rows.insert(key, value);
        true
    }

    fn get(&self, key: &K) -> Option<V> {
        self.rows.get(key).cloned()
    }

    fn page(&self, page: PageRequest) -> Page<V> {
        let ordered: Vec<V> = self
            .order
            .iter()
            .rev()
            .filter_map(|key| self.rows.get(key))
            .cloned()
            .collect();
        Page::new(page.slice(&ordered), ordered.len() as u64)
    }
}

impl InMemoryFacilityRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> FacilityRepositoryResult<RwLockReadGuard<'_, InMemoryFacilityState>> {
        self.state
            .read()
            .map_err(|err| lock_poisoned::<FacilityRepositoryError>(&err))
    }

    fn write(&self) -> FacilityRepositoryResult<RwLockWriteGuard<'_, InMemoryFacilityState>> {
        self.state
            .write()
            .map_err(|err| lock_poisoned::<FacilityRepositoryError>(&err))
    }
}

#[async_trait]
impl FacilityRepository for InMemoryFacilityRepository {
    async fn store_warehouse(&self, warehouse: &Warehouse) -> FacilityRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.warehouses.insert(warehouse.id(), warehouse.clone()) {
            return Err(FacilityRepositoryError::Duplicate(
                warehouse.id().into_inner(),
            ));
        }
        Ok(())
    }

    async fn find_warehouse(&self, id: WarehouseId) -> FacilityRepositoryResult<Option<Warehouse>> {
        Ok(self.read()?.warehouses.get(&id))
    }

    async fn list_warehouses(&self, page: PageRequest) -> FacilityRepositoryResult<Page<Warehouse>> {
        Ok(self.read()?.warehouses.page(page))
    }

    async fn store_cage(&self, cage: &Cage) -> FacilityRepositoryResult<()> {
        let mut state = self.write()?;
        if state.warehouses.get(&cage.warehouse_id()).is_none() {
            return Err(FacilityRepositoryError::WarehouseNotFound(
                cage.warehouse_id(),
            ));
        }
        if state.cages.contains_key(&cage.id()) {
            return Err(FacilityRepositoryError::Duplicate(cage.id().into_inner()));
        }
        state.cages.insert(cage.id(), cage.clone());
        Ok(())
    }

    async fn update_cage(&self, cage: &Cage) -> FacilityRepositoryResult<()> {
        let mut state = self.write()?;
        let slot = state
            .cages
            .get_mut(&cage.id())
            .ok_or(FacilityRepositoryError::CageNotFound(cage.id()))?;
        *slot = cage.clone();
        Ok(())
    }

    async fn find_cage(&self, id: CageId) -> FacilityRepositoryResult<Option<Cage>> {
        Ok(self.read()?.cages.get(&id).cloned())
    }

    async fn find_cages(&self, ids: &[CageId]) -> FacilityRepositoryResult<Vec<Cage>> {
        let state = self.read()?;
        Ok(ids
            .iter()
            .filter_map(|id| state.cages.get(id))
            .cloned()
            .collect())
    }

    async fn list_cages(&self, warehouse_id: WarehouseId) -> FacilityRepositoryResult<Vec<Cage>> {
        let state = self.read()?;
        let mut cages: Vec<Cage> = state
            .cages
            .values()
            .filter(|cage| cage.warehouse_id() == warehouse_id)
            .cloned()
            .collect();
        cages.sort_by(|left, right| left.code().cmp(right.code()));
        Ok(cages)
    }

    async fn store_employee(&self, employee: &Employee) -> FacilityRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.employees.insert(employee.id(), employee.clone()) {
            return Err(FacilityRepositoryError::Duplicate(
                employee.id().into_inner(),
            ));
        }
        Ok(())
    }

    async fn find_employee(&self, id: EmployeeId) -> FacilityRepositoryResult<Option<Employee>> {
        Ok(self.read()?.employees.get(&id))
    }

    async fn list_employees(&self, page: PageRequest) -> FacilityRepositoryResult<Page<Employee>> {
        Ok(self.read()?.employees.page(page))
    }
}
