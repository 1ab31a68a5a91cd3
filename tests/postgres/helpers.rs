//! Shared helpers for `PostgreSQL` integration tests.

use cagekeeper::persistence::{PgPool, apply_migrations};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use pg_embedded_setup_unpriv::TestCluster;
use tokio::runtime::Runtime;

/// Template database holding the migrated schema.
pub const TEMPLATE_DB: &str = "cagekeeper_test_template";

/// Creates a runtime for driving the async repositories from sync tests.
///
/// # Errors
///
/// Returns an error when the runtime cannot be built.
pub fn test_runtime() -> eyre::Result<Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

/// Ensures the template database exists with every migration applied.
///
/// # Errors
///
/// Returns an error when the template cannot be created or migrated.
pub fn ensure_template(cluster: &TestCluster) -> eyre::Result<()> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            apply_migrations(&mut conn).map_err(|e| eyre::eyre!("migration failed: {e}"))?;
            Ok(())
        })
        .map_err(|e| eyre::eyre!("template setup failed: {e}"))
}

/// Per-test database cloned from [`TEMPLATE_DB`] and dropped afterwards.
pub struct TestDatabase {
    cluster: &'static TestCluster,
    name: String,
    pool: Option<PgPool>,
}

impl TestDatabase {
    /// Clones the template into a fresh database named after `prefix`.
    ///
    /// # Errors
    ///
    /// Returns an error when the template or the clone cannot be created.
    pub fn create(cluster: &'static TestCluster, prefix: &str) -> eyre::Result<Self> {
        ensure_template(cluster)?;
        let name = format!("{prefix}_{}", uuid::Uuid::new_v4().simple());
        cluster
            .create_database_from_template(name.as_str(), TEMPLATE_DB)
            .map_err(|e| eyre::eyre!("create database {name}: {e}"))?;
        let url = cluster.connection().database_url(&name);
        let manager = ConnectionManager::<PgConnection>::new(url);
        let pool = Pool::builder().max_size(1).build(manager)?;
        Ok(Self {
            cluster,
            name,
            pool: Some(pool),
        })
    }

    /// Returns a handle to the shared pool.
    ///
    /// # Errors
    ///
    /// Returns an error once the database has been torn down.
    pub fn pool(&self) -> eyre::Result<PgPool> {
        self.pool
            .clone()
            .ok_or_else(|| eyre::eyre!("database {} already dropped", self.name))
    }

    /// Opens a direct connection for arranging rows the adapters never write.
    ///
    /// # Errors
    ///
    /// Returns an error when the connection fails.
    pub fn connect(&self) -> eyre::Result<PgConnection> {
        let url = self.cluster.connection().database_url(&self.name);
        Ok(PgConnection::establish(&url)?)
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        drop(self.pool.take());
        if let Err(err) = self.cluster.drop_database(self.name.as_str()) {
            tracing::warn!(database = %self.name, %err, "failed to drop test database");
        }
    }
}
