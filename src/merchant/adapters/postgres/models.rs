//! Diesel row models for merchant persistence.

use super::schema::merchants;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for merchant records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = merchants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MerchantRow {
    /// Primary key.
    pub id: uuid::Uuid,
    /// Merchant name.
    pub name: String,
    /// Merchant contact person.
    pub contact_person: String,
    /// Merchant phone number.
    pub phone: String,
    /// Postal address, empty when unknown.
    pub address: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for merchant records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = merchants)]
pub struct NewMerchantRow {
    /// Primary key.
    pub id: uuid::Uuid,
    /// Merchant name.
    pub name: String,
    /// Merchant contact person.
    pub contact_person: String,
    /// Merchant phone number.
    pub phone: String,
    /// Postal address, empty when unknown.
    pub address: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied by merchant updates.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = merchants)]
pub struct MerchantChangeset {
    /// Replacement merchant name.
    pub name: String,
    /// Replacement contact person.
    pub contact_person: String,
    /// Replacement phone number.
    pub phone: String,
    /// Replacement postal address.
    pub address: String,
    /// Refreshed update timestamp.
    pub updated_at: DateTime<Utc>,
}
