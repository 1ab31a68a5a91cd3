//! Applies the Cagekeeper schema to the configured `PostgreSQL` database.
//!
//! Usage:
//!
//! ```text
//! cagekeeper-schema [config-path]
//! ```
//!
//! Settings come from `config-path` (default `config/cagekeeper.toml`) and
//! `CAGEKEEPER__`-prefixed environment variables. Every migration script is
//! idempotent, so the tool can run on each deployment.

use cagekeeper::config::{DEFAULT_CONFIG_FILE, Settings};
use cagekeeper::persistence::apply_migrations;
use cagekeeper::telemetry::init_tracing;
use diesel::Connection;
use diesel::pg::PgConnection;
use std::env;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn main() -> Result<(), BoxError> {
    let config_path = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_owned());
    let settings = Settings::load_from(&config_path)?;
    init_tracing(&settings.logging)?;

    run(&settings).inspect_err(|err| {
        tracing::error!(error = %err, "schema migration failed");
    })
}

fn run(settings: &Settings) -> Result<(), BoxError> {
    tracing::info!(url = %redact(&settings.database.url), "connecting to database");
    let mut connection = PgConnection::establish(&settings.database.url)?;
    apply_migrations(&mut connection)?;
    tracing::info!("schema is up to date");
    Ok(())
}

/// Hides the password component of a connection URL.
fn redact(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            let credentials = url.get(scheme_end + 3..at).unwrap_or_default();
            let user = credentials.split(':').next().unwrap_or_default();
            let scheme = url.get(..scheme_end).unwrap_or_default();
            let host = url.get(at..).unwrap_or_default();
            format!("{scheme}://{user}:***{host}")
        }
        _ => url.to_owned(),
    }
}
