//! Adapter implementations for batch persistence.

pub mod memory;
pub mod postgres;
