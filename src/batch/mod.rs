//! Collar batches issued to merchants.
//!
//! A batch is created together with its collars in one write and is never
//! edited afterwards. Every collar carries a globally unique code that can
//! be traced back to the owning merchant.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
