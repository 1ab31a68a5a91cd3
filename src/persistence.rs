//! Shared `PostgreSQL` plumbing: connection pool, blocking bridge and
//! schema migrations.

use crate::config::DatabaseSettings;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use std::time::Duration;

/// `PostgreSQL` connection pool type used by every adapter.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Ordered schema migrations as `(name, up.sql)` pairs.
pub const MIGRATIONS: [(&str, &str); 3] = [
    (
        "2026-10-01-000000_create_merchant_tables",
        include_str!("../migrations/2026-10-01-000000_create_merchant_tables/up.sql"),
    ),
    (
        "2026-10-01-000001_create_facility_tables",
        include_str!("../migrations/2026-10-01-000001_create_facility_tables/up.sql"),
    ),
    (
        "2026-10-01-000002_create_task_tables",
        include_str!("../migrations/2026-10-01-000002_create_task_tables/up.sql"),
    ),
];

/// Builds a connection pool from database settings.
///
/// # Errors
///
/// Returns [`PoolError`] when the pool cannot open its initial connections.
pub fn build_pool(settings: &DatabaseSettings) -> Result<PgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(settings.url.as_str());
    Pool::builder()
        .max_size(settings.max_connections)
        .connection_timeout(Duration::from_secs(settings.connection_timeout_seconds))
        .build(manager)
}

/// Applies every entry of [`MIGRATIONS`] inside one transaction.
///
/// The scripts are idempotent, so re-running them is harmless.
///
/// # Errors
///
/// Returns the first diesel error raised by a script; nothing is committed
/// in that case.
pub fn apply_migrations(connection: &mut PgConnection) -> Result<(), diesel::result::Error> {
    use diesel::Connection;

    connection.transaction(|conn| {
        for (name, sql) in MIGRATIONS {
            tracing::info!(migration = name, "applying schema migration");
            conn.batch_execute(sql)?;
        }
        Ok(())
    })
}

/// Repository error types that can wrap an opaque storage failure.
pub trait PersistenceFailure: Sized {
    /// Wraps a storage-layer error.
    fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self;
}

/// Runs a diesel closure on a pooled connection off the async executor.
///
/// # Errors
///
/// Returns `E::persistence` when no connection is available or the blocking
/// task panics; otherwise whatever the closure returns.
pub(crate) async fn run_blocking<F, T, E>(pool: &PgPool, f: F) -> Result<T, E>
where
    F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: PersistenceFailure + Send + 'static,
{
    let shared_pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = shared_pool.get().map_err(E::persistence)?;
        f(&mut connection)
    })
    .await
    .map_err(E::persistence)?
}

/// Maps a poisoned in-memory lock onto a persistence failure.
pub(crate) fn lock_poisoned<E: PersistenceFailure>(err: &impl std::fmt::Display) -> E {
    E::persistence(std::io::Error::other(err.to_string()))
}

/// Converts a domain `u32` into an `INTEGER` column value.
pub(crate) fn to_sql_int<E: PersistenceFailure>(value: u32) -> Result<i32, E> {
    i32::try_from(value).map_err(E::persistence)
}

/// Converts an `INTEGER` column value back into a domain `u32`.
pub(crate) fn from_sql_int<E: PersistenceFailure>(value: i32) -> Result<u32, E> {
    u32::try_from(value).map_err(E::persistence)
}

/// Converts a `COUNT(*)` result into a page total.
pub(crate) fn to_total<E: PersistenceFailure>(count: i64) -> Result<u64, E> {
    u64::try_from(count).map_err(E::persistence)
}
