//! Cage maintenance tasks and the templates they are created from.
//!
//! Templates carry a name, description, recurrence classification and an
//! estimated duration. Tasks bind a template to a warehouse, an assignee and
//! a set of cages, and move through `PENDING`, `IN_PROGRESS` and
//! `COMPLETED`. Recurrence is descriptive only; nothing here expands a
//! recurring template into future tasks.
//!
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
