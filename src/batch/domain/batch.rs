//! Batch aggregate and the issue that creates it with its collars.

use super::{BatchDomainError, BatchId, Collar, CollarCode};
use crate::merchant::domain::MerchantId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Validated number of collars in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollarCount(u32);

impl CollarCount {
    /// Validates a requested collar count against the configured ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`BatchDomainError::ZeroCollarCount`] for zero and
    /// [`BatchDomainError::TooManyCollars`] above `max`.
    pub const fn new(value: u32, max: u32) -> Result<Self, BatchDomainError> {
        if value == 0 {
            return Err(BatchDomainError::ZeroCollarCount);
        }
        if value > max {
            return Err(BatchDomainError::TooManyCollars {
                requested: value,
                max,
            });
        }
        Ok(Self(value))
    }

    /// Wraps a count read back from storage.
    #[must_use]
    pub const fn from_persisted(value: u32) -> Self {
        Self(value)
    }

    /// Returns the count.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

/// Batch of collars issued to one merchant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    id: BatchId,
    merchant_id: MerchantId,
    collar_count: CollarCount,
    #[serde(with = "crate::timestamp")]
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBatchData {
    /// Persisted batch identifier.
    pub id: BatchId,
    /// Owning merchant.
    pub merchant_id: MerchantId,
    /// Number of collars issued.
    pub collar_count: CollarCount,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Batch {
    /// Reconstructs a batch from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedBatchData) -> Self {
        Self {
            id: data.id,
            merchant_id: data.merchant_id,
            collar_count: data.collar_count,
            created_at: data.created_at,
        }
    }

    /// Returns the batch identifier.
    #[must_use]
    pub const fn id(&self) -> BatchId {
        self.id
    }

    /// Returns the owning merchant.
    #[must_use]
    pub const fn merchant_id(&self) -> MerchantId {
        self.merchant_id
    }

    /// Returns the number of collars issued.
    #[must_use]
    pub const fn collar_count(&self) -> CollarCount {
        self.collar_count
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A new batch together with all of its collars, written as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchIssue {
    batch: Batch,
    collars: Vec<Collar>,
}

impl BatchIssue {
    /// Generates a batch of `count` collars with pairwise distinct codes.
    ///
    /// All collars share the batch's merchant and creation time.
    #[must_use]
    pub fn generate(merchant_id: MerchantId, count: CollarCount, clock: &impl Clock) -> Self {
        let created_at = clock.utc();
        let batch = Batch {
            id: BatchId::new(),
            merchant_id,
            collar_count: count,
            created_at,
        };
        let capacity = usize::try_from(count.value()).unwrap_or_default();
        let mut seen = HashSet::with_capacity(capacity);
        let mut collars = Vec::with_capacity(capacity);
        while collars.len() < capacity {
            let code = CollarCode::generate();
            if seen.insert(code.clone()) {
                collars.push(Collar::issue(merchant_id, batch.id, code, created_at));
            }
        }
        Self { batch, collars }
    }

    /// Returns the batch header.
    #[must_use]
    pub const fn batch(&self) -> &Batch {
        &self.batch
    }

    /// Returns the issued collars.
    #[must_use]
    pub fn collars(&self) -> &[Collar] {
        &self.collars
    }
}
