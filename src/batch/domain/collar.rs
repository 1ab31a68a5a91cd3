//! Collar entity and its traceable code.

use super::{BatchDomainError, BatchId, CollarId};
use crate::merchant::domain::MerchantId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Number of characters in a collar code.
const COLLAR_CODE_LEN: usize = 32;

/// Globally unique collar code: a random 128-bit value as lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollarCode(String);

impl CollarCode {
    /// Generates a fresh random code.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Parses a code supplied by a caller.
    ///
    /// Surrounding whitespace is ignored and upper-case hex is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`BatchDomainError::InvalidCollarCode`] unless the value is
    /// exactly 32 hexadecimal characters.
    pub fn parse(raw: &str) -> Result<Self, BatchDomainError> {
        let normalized = raw.trim().to_ascii_lowercase();
        let well_formed = normalized.len() == COLLAR_CODE_LEN
            && normalized.chars().all(|ch| ch.is_ascii_hexdigit());
        if !well_formed {
            return Err(BatchDomainError::InvalidCollarCode(raw.to_owned()));
        }
        Ok(Self(normalized))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollarCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single tracking collar issued in a batch. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collar {
    id: CollarId,
    merchant_id: MerchantId,
    batch_id: BatchId,
    collar_code: CollarCode,
    #[serde(with = "crate::timestamp")]
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted collar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCollarData {
    /// Persisted collar identifier.
    pub id: CollarId,
    /// Owning merchant.
    pub merchant_id: MerchantId,
    /// Owning batch.
    pub batch_id: BatchId,
    /// Persisted collar code.
    pub collar_code: CollarCode,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Collar {
    pub(super) fn issue(
        merchant_id: MerchantId,
        batch_id: BatchId,
        collar_code: CollarCode,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CollarId::new(),
            merchant_id,
            batch_id,
            collar_code,
            created_at,
        }
    }

    /// Reconstructs a collar from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCollarData) -> Self {
        Self {
            id: data.id,
            merchant_id: data.merchant_id,
            batch_id: data.batch_id,
            collar_code: data.collar_code,
            created_at: data.created_at,
        }
    }

    /// Returns the collar identifier.
    #[must_use]
    pub const fn id(&self) -> CollarId {
        self.id
    }

    /// Returns the owning merchant.
    #[must_use]
    pub const fn merchant_id(&self) -> MerchantId {
        self.merchant_id
    }

    /// Returns the owning batch.
    #[must_use]
    pub const fn batch_id(&self) -> BatchId {
        self.batch_id
    }

    /// Returns the collar code.
    #[must_use]
    pub const fn collar_code(&self) -> &CollarCode {
        &self.collar_code
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
