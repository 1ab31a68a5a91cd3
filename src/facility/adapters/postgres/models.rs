//! Diesel row models for facility persistence.

use super::schema::{cages, employees, warehouses};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Warehouse row, used for reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = warehouses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WarehouseRow {
    /// Primary key.
    pub id: uuid::Uuid,
    /// Warehouse name.
    pub name: String,
    /// Optional postal address.
    pub address: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Cage row, used for reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = cages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CageRow {
    /// Primary key.
    pub id: uuid::Uuid,
    /// Owning warehouse.
    pub warehouse_id: uuid::Uuid,
    /// Cage code.
    pub code: String,
    /// Free-text status label.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Employee row, used for reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = employees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EmployeeRow {
    /// Primary key.
    pub id: uuid::Uuid,
    /// Employee name.
    pub name: String,
    /// Employee phone number.
    pub phone: String,
    /// Employee role.
    pub role: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest update timestamp.
    pub updated_at: DateTime<Utc>,
}
