//! Database URL handling for per-request SQLite connections.

use rusqlite::{Connection, OpenFlags};
use std::time::Duration;
use thiserror::Error;

/// How long a connection waits for another writer's lock.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("DATABASE_URL not found")]
    MissingDatabaseUrl,

    #[error("Unsupported database url scheme '{0}', expected sqlite://, sqlite: or file:")]
    UnsupportedScheme(String),
}

/// Turns a database URL into the target handed to `Connection::open_with_flags`.
///
/// Accepts `sqlite://<path>`, `sqlite:<path>`, `file:<uri>` and plain paths.
pub fn parse_database_url(url: &str) -> Result<String, StoreError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(StoreError::MissingDatabaseUrl);
    }

    if let Some(path) = url.strip_prefix("sqlite://") {
        return non_empty_target(path);
    }
    if let Some(path) = url.strip_prefix("sqlite:") {
        return non_empty_target(path);
    }
    if url.starts_with("file:") {
        return Ok(url.to_string());
    }
    if let Some((scheme, _)) = url.split_once("://") {
        return Err(StoreError::UnsupportedScheme(scheme.to_string()));
    }
    Ok(url.to_string())
}

fn non_empty_target(path: &str) -> Result<String, StoreError> {
    if path.is_empty() {
        Err(StoreError::MissingDatabaseUrl)
    } else {
        Ok(path.to_string())
    }
}

/// Opens a connection. Without `create` the database file must already exist.
pub fn open_connection(target: &str, create: bool) -> rusqlite::Result<Connection> {
    let mut flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    if create {
        flags |= OpenFlags::SQLITE_OPEN_CREATE;
    }
    let conn = Connection::open_with_flags(target, flags)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    Ok(conn)
}
