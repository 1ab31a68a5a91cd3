//! Warehouses, the cages inside them and the employees who work there.
//!
//! These records are referenced by tasks; the module keeps them small and
//! validated. It follows the same hexagonal layout as the other contexts.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
