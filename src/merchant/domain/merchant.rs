//! Merchant aggregate root.

use super::{MerchantDomainError, MerchantId, SearchKeyword, SearchMode};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated merchant contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantProfile {
    name: String,
    contact_person: String,
    phone: String,
    address: String,
}

impl MerchantProfile {
    /// Creates validated contact details.
    ///
    /// Name, contact person and phone are trimmed and must be non-empty.
    /// Name and contact person hold at most 100 characters, the phone at
    /// most 20. The address is free text.
    ///
    /// # Errors
    ///
    /// Returns the [`MerchantDomainError`] naming the first blank or
    /// over-long field.
    pub fn new(
        name: impl Into<String>,
        contact_person: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Result<Self, MerchantDomainError> {
        Ok(Self {
            name: required(name.into(), "name", NAME_MAX, MerchantDomainError::EmptyName)?,
            contact_person: required(
                contact_person.into(),
                "contact_person",
                NAME_MAX,
                MerchantDomainError::EmptyContactPerson,
            )?,
            phone: required(phone.into(), "phone", PHONE_MAX, MerchantDomainError::EmptyPhone)?,
            address: address.into().trim().to_owned(),
        })
    }

    /// Returns the merchant name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the contact person.
    #[must_use]
    pub fn contact_person(&self) -> &str {
        &self.contact_person
    }

    /// Returns the phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Returns the postal address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }
}

const NAME_MAX: usize = 100;
const PHONE_MAX: usize = 20;

fn required(
    value: String,
    field: &'static str,
    max: usize,
    blank: MerchantDomainError,
) -> Result<String, MerchantDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(blank);
    }
    if trimmed.chars().count() > max {
        return Err(MerchantDomainError::TooLong { field, max });
    }
    Ok(trimmed.to_owned())
}

/// Partial replacement of merchant contact details.
///
/// Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MerchantUpdate {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement contact person.
    pub contact_person: Option<String>,
    /// Replacement phone number.
    pub phone: Option<String>,
    /// Replacement address.
    pub address: Option<String>,
}

/// Merchant aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merchant {
    id: MerchantId,
    #[serde(flatten)]
    profile: MerchantProfile,
    #[serde(with = "crate::timestamp")]
    created_at: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted merchant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedMerchantData {
    /// Persisted merchant identifier.
    pub id: MerchantId,
    /// Persisted contact details.
    pub profile: MerchantProfile,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Merchant {
    /// Creates a new merchant.
    #[must_use]
    pub fn new(profile: MerchantProfile, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: MerchantId::new(),
            profile,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a merchant from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedMerchantData) -> Self {
        Self {
            id: data.id,
            profile: data.profile,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the merchant identifier.
    #[must_use]
    pub const fn id(&self) -> MerchantId {
        self.id
    }

    /// Returns the contact details.
    #[must_use]
    pub const fn profile(&self) -> &MerchantProfile {
        &self.profile
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

    /// Applies a partial update, re-validating the merged details.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantDomainError`] when a replacement value is blank.
    /// The merchant is left unchanged in that case.
    pub fn apply(
        &mut self,
        update: MerchantUpdate,
        clock: &impl Clock,
    ) -> Result<(), MerchantDomainError> {
        let MerchantUpdate {
            name,
            contact_person,
            phone,
            address,
        } = update;
        let current = &self.profile;
        let merged = MerchantProfile::new(
            name.unwrap_or_else(|| current.name.clone()),
            contact_person.unwrap_or_else(|| current.contact_person.clone()),
            phone.unwrap_or_else(|| current.phone.clone()),
            address.unwrap_or_else(|| current.address.clone()),
        )?;
        self.profile = merged;
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Returns `true` when the name, contact person or phone contains the
    /// keyword.
    #[must_use]
    pub fn matches(&self, keyword: &SearchKeyword, mode: SearchMode) -> bool {
        [
            self.profile.name(),
            self.profile.contact_person(),
            self.profile.phone(),
        ]
        .into_iter()
        .any(|field| mode.contains(field, keyword.as_str()))
    }
}
