//! In-memory adapter for merchant persistence.

mod merchant;

pub use merchant::InMemoryMerchantRepository;
