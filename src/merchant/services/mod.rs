//! Application services for merchant records.

mod merchants;

pub use merchants::{
    CreateMerchantRequest, MerchantService, MerchantServiceError, MerchantServiceResult,
    UpdateMerchantRequest,
};
