//! Shared wiring for in-memory integration tests.

use std::sync::Arc;

use cagekeeper::batch::{adapters::memory::InMemoryBatchRepository, services::BatchService};
use cagekeeper::facility::{
    adapters::memory::InMemoryFacilityRepository,
    domain::{CageId, EmployeeId, WarehouseId},
    services::{CreateCageRequest, CreateEmployeeRequest, CreateWarehouseRequest, FacilityService},
};
use cagekeeper::merchant::{
    adapters::memory::InMemoryMerchantRepository, domain::SearchMode, services::MerchantService,
};
use cagekeeper::task::{
    adapters::memory::{InMemoryTaskRepository, InMemoryTaskTemplateRepository},
    domain::TaskTemplate,
    services::{CreateTaskTemplateRequest, TaskLifecycleService, TaskTemplateService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Merchant service over in-memory storage.
pub type Merchants =
    MerchantService<InMemoryMerchantRepository, InMemoryBatchRepository, DefaultClock>;
/// Batch service over in-memory storage.
pub type Batches = BatchService<InMemoryBatchRepository, InMemoryMerchantRepository, DefaultClock>;
/// Facility service over in-memory storage.
pub type Facility = FacilityService<InMemoryFacilityRepository, DefaultClock>;
/// Template service over in-memory storage.
pub type Templates =
    TaskTemplateService<InMemoryTaskTemplateRepository, InMemoryTaskRepository, DefaultClock>;
/// Lifecycle service over in-memory storage.
pub type Lifecycle = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemoryTaskTemplateRepository,
    InMemoryFacilityRepository,
    DefaultClock,
>;

/// Every service wired to one shared set of in-memory repositories.
pub struct Platform {
    pub merchants: Merchants,
    pub batches: Batches,
    pub facility: Facility,
    pub templates: Templates,
    pub lifecycle: Lifecycle,
}

/// Provides a fresh platform for each test.
#[fixture]
pub fn platform() -> Platform {
    let clock = Arc::new(DefaultClock);
    let merchant_repo = Arc::new(InMemoryMerchantRepository::new());
    let batch_repo = Arc::new(InMemoryBatchRepository::new());
    let facility_repo = Arc::new(InMemoryFacilityRepository::new());
    let template_repo = Arc::new(InMemoryTaskTemplateRepository::new());
    let task_repo = Arc::new(InMemoryTaskRepository::new());

    Platform {
        merchants: MerchantService::new(
            Arc::clone(&merchant_repo),
            Arc::clone(&batch_repo),
            Arc::clone(&clock),
        )
        .with_search_mode(SearchMode::CaseSensitive),
        batches: BatchService::new(
            batch_repo,
            merchant_repo,
            Arc::clone(&clock),
        ),
        facility: FacilityService::new(Arc::clone(&facility_repo), Arc::clone(&clock)),
        templates: TaskTemplateService::new(
            Arc::clone(&template_repo),
            Arc::clone(&task_repo),
            Arc::clone(&clock),
        ),
        lifecycle: TaskLifecycleService::new(task_repo, template_repo, facility_repo, clock),
    }
}

/// A warehouse with cages, a worker and a daily feeding template.
pub struct Site {
    pub template: TaskTemplate,
    pub warehouse: WarehouseId,
    pub cages: Vec<CageId>,
    pub worker: EmployeeId,
}

impl Platform {
    /// Seeds a site with the given cage codes.
    ///
    /// # Errors
    ///
    /// Returns an error when any seeding call fails.
    pub async fn seed_site(&self, cage_codes: &[&str]) -> eyre::Result<Site> {
        let template = self
            .templates
            .create_task_template(
                CreateTaskTemplateRequest::new("Feed", "daily")
                    .with_description("Morning feed")
                    .with_estimated_duration(30),
            )
            .await?;
        let warehouse = self
            .facility
            .create_warehouse(CreateWarehouseRequest::new("North barn"))
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
            .create_employee(CreateEmployeeRequest::new("Dana", "555-0100", "keeper"))
            .await?
            .id();
        Ok(Site {
            template,
            warehouse,
            cages,
            worker,
        })
    }
}
