//! SQLite connection pool.

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use thiserror::Error;
use tracing::debug;

/// Database error types.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Connection(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database connection lock poisoned")]
    Lock,
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

/// Shared handle to a single SQLite connection.
///
/// The pipeline is strictly sequential, so one connection behind a mutex is
/// all the pooling it needs. Cloning shares the same connection.
#[derive(Clone)]
pub struct DbPool {
    conn: Arc<Mutex<Connection>>,
}

impl DbPool {
    /// Open (or create) a database file, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "foreign_keys", true)?;
        debug!(path = %path.display(), "Opened SQLite database");

        Ok(Self::from_connection(conn))
    }

    /// Open a private in-memory database (used by tests).
    pub fn in_memory() -> DbResult<Self> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Run a closure with shared access to the connection.
    pub fn with_conn<T, F>(&self, f: F) -> DbResult<T>
    where
        F: FnOnce(&Connection) -> DbResult<T>,
    {
        let conn = self.conn.lock().map_err(|_| DbError::Lock)?;
        f(&conn)
    }

    /// Run a closure with exclusive access to the connection.
    pub fn with_conn_mut<T, F>(&self, f: F) -> DbResult<T>
    where
        F: FnOnce(&mut Connection) -> DbResult<T>,
    {
        let mut conn = self.conn.lock().map_err(|_| DbError::Lock)?;
        f(&mut conn)
    }
}
