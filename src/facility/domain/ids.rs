//! Identifier types for the facility domain.

use crate::ids::uuid_identifier;

uuid_identifier! {
    /// Unique identifier for a warehouse.
    WarehouseId
}

uuid_identifier! {
    /// Unique identifier for a cage.
    CageId
}

uuid_identifier! {
    /// Unique identifier for an employee.
    EmployeeId
}
