//! Cage entity and its free-text status.

use super::{CageId, FacilityDomainError, WarehouseId, required_text};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operational status label of a cage, for example `ACTIVE`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CageStatus(String);

impl CageStatus {
    /// Status given to new cages when none is supplied.
    pub const DEFAULT: &'static str = "ACTIVE";

    /// Creates a trimmed, non-blank status label of at most 20 characters.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityDomainError::EmptyCageStatus`] for a blank label and
    /// [`FacilityDomainError::TooLong`] for an over-long one.
    pub fn new(value: impl Into<String>) -> Result<Self, FacilityDomainError> {
        required_text(
            value.into(),
            "cage status",
            20,
            FacilityDomainError::EmptyCageStatus,
        )
        .map(Self)
    }

    /// Returns the status label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CageStatus {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for CageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A cage located in one warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cage {
    id: CageId,
    warehouse_id: WarehouseId,
    code: String,
    status: CageStatus,
    #[serde(with = "crate::timestamp")]
    created_at: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted cage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCageData {
    /// Persisted identifier.
    pub id: CageId,
    /// Owning warehouse.
    pub warehouse_id: WarehouseId,
    /// Persisted cage code.
    pub code: String,
    /// Persisted status.
    pub status: CageStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Cage {
    /// Creates a cage in a warehouse.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityDomainError::EmptyCageCode`] for a blank code and
    /// [`FacilityDomainError::TooLong`] past 50 characters.
    pub fn new(
        warehouse_id: WarehouseId,
        code: impl Into<String>,
        status: CageStatus,
        clock: &impl Clock,
    ) -> Result<Self, FacilityDomainError> {
        let timestamp = clock.utc();
        Ok(Self {
            id: CageId::new(),
            warehouse_id,
            code: required_text(code.into(), "cage code", 50, FacilityDomainError::EmptyCageCode)?,
            status,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a cage from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCageData) -> Self {
        Self {
            id: data.id,
            warehouse_id: data.warehouse_id,
            code: data.code,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> CageId {
        self.id
    }

    /// Returns the owning warehouse.
    #[must_use]
    pub const fn warehouse_id(&self) -> WarehouseId {
        self.warehouse_id
    }

    /// Returns the cage code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the status label.
    #[must_use]
    pub const fn status(&self) -> &CageStatus {
        &self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the status label.
    pub fn set_status(&mut self, status: CageStatus, clock: &impl Clock) {
        self.status = status;
        self.updated_at = clock.utc();
    }
}
