//! Adapter implementations for merchant persistence.

pub mod memory;
pub mod postgres;
