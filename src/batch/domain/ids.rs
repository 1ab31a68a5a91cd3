//! Identifier types for the batch domain.

use crate::ids::uuid_identifier;

uuid_identifier! {
    /// Unique identifier for a collar batch.
    BatchId
}

uuid_identifier! {
    /// Unique identifier for a single collar.
    CollarId
}
