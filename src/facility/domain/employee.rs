//! Employee entity.

use super::{EmployeeId, FacilityDomainError, required_text};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A warehouse worker who can be assigned tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    id: EmployeeId,
    name: String,
    phone: String,
    role: String,
    #[serde(with = "crate::timestamp")]
    created_at: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedEmployeeData {
    /// Persisted identifier.
    pub id: EmployeeId,
    /// Persisted name.
    pub name: String,
    /// Persisted phone number.
    pub phone: String,
    /// Persisted role.
    pub role: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// Creates an employee.
    ///
    /// # Errors
    ///
    /// Returns the [`FacilityDomainError`] naming the first blank or
    /// over-long field. The name holds 50 characters, phone and role 20.
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        role: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, FacilityDomainError> {
        let timestamp = clock.utc();
        Ok(Self {
            id: EmployeeId::new(),
            name: required_text(
                name.into(),
                "employee name",
                50,
                FacilityDomainError::EmptyEmployeeName,
            )?,
            phone: required_text(
                phone.into(),
                "employee phone",
                20,
                FacilityDomainError::EmptyEmployeePhone,
            )?,
            role: required_text(
                role.into(),
                "employee role",
                20,
                FacilityDomainError::EmptyEmployeeRole,
            )?,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs an employee from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedEmployeeData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            phone: data.phone,
            role: data.role,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> EmployeeId {
        self.id
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Returns the role.
    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
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
