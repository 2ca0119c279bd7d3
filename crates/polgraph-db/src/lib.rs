//! Polgraph Database Layer
//!
//! SQLite persistence for the relational side of the pipeline: the
//! `political_persons` table that feeds graph ingestion.

pub mod migrations;
pub mod pool;
pub mod queries;

pub use pool::{DbError, DbPool, DbResult};

/// Default location of the SQLite database, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = ".polgraph/polgraph.db";

/// Open the database at `path` and bring its schema up to date.
pub fn init_pool(path: impl AsRef<std::path::Path>) -> DbResult<DbPool> {
    let pool = DbPool::open(path)?;
    migrations::run_migrations(&pool)?;
    Ok(pool)
}

