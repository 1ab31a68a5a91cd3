//! Diesel row models for batch persistence.

use super::schema::{batches, collars};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row shared by batch queries and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = batches)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BatchRow {
    /// Primary key.
    pub id: uuid::Uuid,
    /// Owning merchant.
    pub merchant_id: uuid::Uuid,
    /// Number of collars issued.
    pub collar_count: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Row shared by collar queries and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = collars)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CollarRow {
    /// Primary key.
    pub id: uuid::Uuid,
    /// Merchant the collar traces to.
    pub merchant_id: uuid::Uuid,
    /// Batch that issued the collar.
    pub batch_id: uuid::Uuid,
    /// Unique 32-character collar code.
    pub collar_code: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
