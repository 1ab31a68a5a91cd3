//! Application services for facility records.

mod facility;

pub use facility::{
    CreateCageRequest, CreateEmployeeRequest, CreateWarehouseRequest, FacilityService,
    FacilityServiceError, FacilityServiceResult,
};
