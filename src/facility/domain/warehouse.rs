//! Warehouse entity.

use super::{FacilityDomainError, WarehouseId, required_text};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A site holding cages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    id: WarehouseId,
    name: String,
    address: Option<String>,
    #[serde(with = "crate::timestamp")]
    created_at: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted warehouse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedWarehouseData {
    /// Persisted identifier.
    pub id: WarehouseId,
    /// Persisted name.
    pub name: String,
    /// Persisted address.
    pub address: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Warehouse {
    /// Creates a warehouse. A blank address is stored as `None`.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityDomainError::EmptyWarehouseName`] for a blank name
    /// and [`FacilityDomainError::TooLong`] past 100 characters.
    pub fn new(
        name: impl Into<String>,
        address: Option<String>,
        clock: &impl Clock,
    ) -> Result<Self, FacilityDomainError> {
        let timestamp = clock.utc();
        Ok(Self {
            id: WarehouseId::new(),
            name: required_text(
                name.into(),
                "warehouse name",
                100,
                FacilityDomainError::EmptyWarehouseName,
            )?,
            address: address
                .map(|text| text.trim().to_owned())
                .filter(|text| !text.is_empty()),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a warehouse from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedWarehouseData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            address: data.address,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> WarehouseId {
        self.id
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the address, if known.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
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
}
