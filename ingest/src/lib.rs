pub mod models;
pub mod schema;

pub mod processing;
pub mod demos;
pub mod storage;

pub use processing::{run, AnalysisInput, FileError, RunSummary, Target};

use diesel::prelude::*;
use diesel_migrations::MigrationHarness;

pub const MIGRATIONS: diesel_migrations::EmbeddedMigrations =
    diesel_migrations::embed_migrations!("../migrations/");

#[derive(Debug, thiserror::Error)]
#[error("applying migrations failed")]
pub struct MigrationError(#[source] Box<dyn std::error::Error + Send + Sync + 'static>);

pub fn db_connection(database_url: &str) -> Result<SqliteConnection, diesel::ConnectionError> {
    SqliteConnection::establish(database_url)
}

pub fn run_migrations(connection: &mut SqliteConnection) -> Result<(), MigrationError> {
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(MigrationError)?;

    tracing::debug!("Applied {} migrations", applied.len());

    Ok(())
}
