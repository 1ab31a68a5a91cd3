//! Adapter implementations for facility persistence.

pub mod memory;
pub mod postgres;
