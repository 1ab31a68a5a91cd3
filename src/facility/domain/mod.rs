//! Domain model for facility records.

mod cage;
mod employee;
mod error;
mod ids;
mod warehouse;

pub use cage::{Cage, CageStatus, PersistedCageData};
pub use employee::{Employee, PersistedEmployeeData};
pub use error::FacilityDomainError;
pub use ids::{CageId, EmployeeId, WarehouseId};
pub use warehouse::{PersistedWarehouseData, Warehouse};

/// Trims a mandatory text field, rejecting blank input and values longer
/// than `max` characters.
pub(crate) fn required_text(
    value: String,
    field: &'static str,
    max: usize,
    blank: FacilityDomainError,
) -> Result<String, FacilityDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(blank);
    }
    if trimmed.chars().count() > max {
        return Err(FacilityDomainError::TooLong { field, max });
    }
    Ok(trimmed.to_owned())
}
