//! Identifier types for the merchant domain.

use crate::ids::uuid_identifier;

uuid_identifier! {
    /// Unique identifier for a merchant.
    MerchantId
}
