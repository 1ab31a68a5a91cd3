//! Domain model for merchant records and keyword search.

mod error;
mod ids;
mod merchant;
mod search;

pub use error::MerchantDomainError;
pub use ids::MerchantId;
pub use merchant::{Merchant, MerchantProfile, MerchantUpdate, PersistedMerchantData};
pub use search::{SearchKeyword, SearchMode};
