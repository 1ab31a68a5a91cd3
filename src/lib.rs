//! Cagekeeper: merchant, collar and cage-maintenance management core.
//!
//! The crate covers four bounded contexts:
//!
//! - [`merchant`]: merchant records, paging and keyword search
//! - [`batch`]: collar batches issued to merchants and collar tracing
//! - [`facility`]: warehouses, their cages and the employees who work them
//! - [`task`]: task templates and the `PENDING -> IN_PROGRESS -> COMPLETED`
//!   task lifecycle
//!
//! # Architecture
//!
//! Every context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//! - **Services**: Orchestration returning classified errors
//!
//! Cross-cutting pieces live at the crate root: [`config`] for layered
//! settings, [`telemetry`] for log setup, [`envelope`] for the uniform
//! response shape, [`timestamp`] for the wire time format and
//! [`persistence`] for the connection pool and migrations.

pub mod batch;
pub mod config;
pub mod envelope;
pub mod error;
pub mod facility;
mod ids;
pub mod merchant;
pub mod pagination;
pub mod persistence;
pub mod task;
pub mod telemetry;
#[cfg(test)]
mod test_support;
pub mod timestamp;
